use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("option '{option_id}' does not belong to question {question_id}")]
    UnknownOption { question_id: u32, option_id: String },

    #[error("no option selected")]
    NoSelection,

    #[error("quiz already finished")]
    Finished,

    #[error("question bank is empty")]
    EmptyBank,
}
