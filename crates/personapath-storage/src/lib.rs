//! personapath-storage
//!
//! The report store: one JSON blob holding every saved report, read and
//! written whole through a swappable backing.

pub mod backing;
pub mod error;
pub mod state;
pub mod store;

pub use backing::{Backing, FileBacking, MemoryBacking};
pub use store::ReportStore;
