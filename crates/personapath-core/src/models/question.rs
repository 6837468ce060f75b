use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A multiple-choice question from the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

/// One selectable option. `trait_value` is the personality trait the option
/// hints at; it travels with the answer as generation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    pub trait_value: String,
}

impl Question {
    /// Look up one of this question's options by its id.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}
