//! personapath-session
//!
//! The application state controller: one explicit state machine per
//! signed-in user, driving quiz → generation → persistence → results.

pub mod error;
pub mod session;
pub mod stage;
pub mod view;

pub use error::SessionError;
pub use session::{GenerationInput, QuizStep, Session};
pub use stage::Stage;
pub use view::SessionView;
