//! In-memory authoritative roster and its query surface.

/// Analytics, filter, and sort operations over the roster.
pub mod query;
/// Authoritative record store, CRUD, and month configuration.
pub mod store;
