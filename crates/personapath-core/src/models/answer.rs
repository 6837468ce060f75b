use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::question::{AnswerOption, Question};

/// A question/answer snapshot. Holds the text itself rather than ids so a
/// saved transcript stays readable if the question bank changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    pub question_prompt: String,
    pub answer_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub trait_value: Option<String>,
}

impl Answer {
    pub fn from_selection(question: &Question, option: &AnswerOption) -> Self {
        Self {
            question_prompt: question.prompt.clone(),
            answer_text: option.text.clone(),
            trait_value: Some(option.trait_value.clone()),
        }
    }
}
