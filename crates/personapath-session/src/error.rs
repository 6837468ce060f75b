use personapath_core::error::CoreError;
use personapath_quiz::error::QuizError;
use thiserror::Error;

use crate::stage::Stage;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot {action} while in {stage}")]
    InvalidTransition { stage: Stage, action: &'static str },

    /// A generation result for a run this session no longer has.
    #[error("generation result for an abandoned run (now in {stage})")]
    StaleGeneration { stage: Stage },

    #[error(transparent)]
    Profile(#[from] CoreError),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl SessionError {
    /// Whether the error is bad user input rather than a flow violation.
    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Profile(_) | SessionError::Quiz(_))
    }
}
