//! The seam between report generation and whatever model answers it.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// One structured-output request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendRequest {
    pub system_instruction: String,
    pub user_content: String,
    /// JSON Schema the response text must conform to.
    pub output_schema: serde_json::Value,
}

/// The raw model reply. `text` is `None` when the model produced nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendResponse {
    pub text: Option<String>,
}

impl BackendResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

pub type BackendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<BackendResponse, GenerationError>> + Send + 'a>>;

/// A model that turns a [`BackendRequest`] into JSON text.
///
/// Implementations map transport and credential failures to
/// [`GenerationError::Unavailable`]; parsing is the generator's job.
pub trait ReportBackend: Send + Sync {
    /// Identifier for logs, e.g. the model id.
    fn name(&self) -> &str;

    fn complete<'a>(&'a self, request: &'a BackendRequest) -> BackendFuture<'a>;
}
