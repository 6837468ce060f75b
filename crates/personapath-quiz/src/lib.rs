//! personapath-quiz
//!
//! The fixed question bank and the runner that walks a user through it.
//! Pure data and state, no I/O.

pub mod bank;
pub mod error;
pub mod runner;

pub use bank::question_bank;
pub use runner::{Advance, QuizRunner};
