//! Persistence seam: snapshot sink trait and the flat-file implementation.

/// Flat-file snapshot codec.
pub mod file;

use crate::core::store::{RosterSnapshotV1, StoreError};

/// Failure conditions surfaced by the persistence layer.
#[derive(Debug)]
pub enum PersistError {
    /// Underlying file I/O failed (unreadable or unwritable path).
    Io(std::io::Error),
    /// The file exists but its contents are not a valid snapshot.
    Corrupt(String),
    /// The file carries a format version this build does not understand.
    UnsupportedVersion(u16),
    /// A decoded snapshot violated a store invariant.
    Store(StoreError),
}

impl From<std::io::Error> for PersistError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StoreError> for PersistError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot file i/o failed: {err}"),
            Self::Corrupt(what) => write!(f, "snapshot file corrupt: {what}"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported snapshot format version {v}"),
            Self::Store(err) => write!(f, "snapshot rejected by store: {err}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Durable destination for roster snapshots.
///
/// `load` returns `Ok(None)` when no usable prior state exists (absent or
/// truncated file); callers start from a default roster in that case.
pub trait SnapshotSink {
    /// Writes the full snapshot, replacing any previous one.
    fn save(&mut self, snapshot: &RosterSnapshotV1) -> PersistResult<()>;
    /// Reads the last saved snapshot, if one is usable.
    fn load(&self) -> PersistResult<Option<RosterSnapshotV1>>;
}
