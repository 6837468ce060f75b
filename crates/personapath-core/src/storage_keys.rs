//! Storage key conventions.
//!
//! Pure string constants, no I/O. These name the blobs a storage backing
//! holds.

/// The single blob holding every saved report, newest first.
pub const REPORTS: &str = "personapath_db_v1";
