//! Single-month student attendance roster with flat-file persistence.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::RosterStore`]:
//! ```
//! use rollcall::{core::store::RosterStore, types::ThresholdMode};
//!
//! let mut roster = RosterStore::new();
//! roster.add_record(1, "Amit").expect("add");
//! roster.add_record(2, "Bina").expect("add");
//! for day in 1..=27 {
//!     roster.mark_attendance(1, day, true).expect("mark");
//! }
//!
//! let above = roster.filter_by_threshold(50.0, ThresholdMode::Above);
//! assert_eq!(above.len(), 1);
//! assert_eq!(above[0].roll, 1);
//! ```
//!
//! Durable usage with the snapshot file:
//! ```no_run
//! use rollcall::{
//!     core::store::RosterStore,
//!     persist::{file::SnapshotFile, SnapshotSink},
//! };
//!
//! let mut file = SnapshotFile::new("roster.bin");
//! let mut roster = file.load_store().expect("load");
//! roster.add_record(7, "Chen").expect("add");
//! roster.mark_attendance(7, 1, true).expect("mark");
//! file.save(&roster.export_snapshot()).expect("save");
//! ```
//!
//! The crate is the core of an interactive single-user tool: every operation
//! takes fully validated arguments and returns structured results or a named
//! error, leaving prompting and rendering to the caller.
#![deny(missing_docs)]

/// Roster store and query operations.
pub mod core;
/// Snapshot persistence seam and flat-file codec.
pub mod persist;
/// Student record and attendance sheet.
pub mod student;
/// Shared primitive types and enums.
pub mod types;
