//! personapath-bedrock
//!
//! Personality report generation: prompt assembly, the backend seam, the
//! Bedrock Converse backend, and structured output parsing.

pub mod backend;
pub mod client;
pub mod converse;
pub mod error;
pub mod generator;
pub mod prompt;

pub use backend::{BackendFuture, BackendRequest, BackendResponse, ReportBackend};
pub use error::GenerationError;
pub use generator::ReportGenerator;
