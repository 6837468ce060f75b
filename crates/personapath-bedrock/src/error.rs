use thiserror::Error;

/// Why a report could not be generated.
///
/// Callers only distinguish success from failure; the variants exist for
/// diagnostic logs.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("model returned no text")]
    Empty,

    #[error("response did not conform to the report schema: {0}")]
    Malformed(String),

    #[error("model backend unavailable: {0}")]
    Unavailable(String),
}

impl GenerationError {
    /// Short label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Empty => "empty",
            GenerationError::Malformed(_) => "malformed",
            GenerationError::Unavailable(_) => "unavailable",
        }
    }
}
