//! personapath-export
//!
//! Admin CSV export and Markdown rendering of reports.

pub mod csv_export;
pub mod error;
pub mod render;
