use serde::Serialize;
use ts_rs::TS;

use personapath_core::models::answer::Answer;
use personapath_core::models::question::Question;

use crate::bank::question_bank;
use crate::error::QuizError;

/// Walks through a question bank one question at a time.
///
/// The runner owns its copy of the questions and nothing else; it is dropped
/// once the completed answer set has been handed over.
#[derive(Debug, Clone)]
pub struct QuizRunner {
    questions: Vec<Question>,
    current_index: usize,
    collected_answers: Vec<Answer>,
    pending_selection: Option<String>,
    finished: bool,
}

/// Result of a successful [`QuizRunner::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    Next { index: usize },
    /// The last question was answered. Holds one answer per question, in
    /// bank order.
    Complete(Vec<Answer>),
}

/// Read-only snapshot of where the runner is, for display.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct QuizProgress {
    pub index: usize,
    pub total: usize,
    pub percent: u8,
    pub question: Question,
    pub selected: Option<String>,
    pub is_last: bool,
}

impl QuizRunner {
    /// A runner over the standard question bank.
    pub fn new() -> Self {
        Self::from_parts(question_bank().to_vec())
    }

    /// A runner over a caller-supplied bank.
    pub fn with_questions(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        Ok(Self::from_parts(questions))
    }

    fn from_parts(questions: Vec<Question>) -> Self {
        let capacity = questions.len();
        Self {
            questions,
            current_index: 0,
            collected_answers: Vec::with_capacity(capacity),
            pending_selection: None,
            finished: false,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn pending_selection(&self) -> Option<&str> {
        self.pending_selection.as_deref()
    }

    pub fn answered(&self) -> &[Answer] {
        &self.collected_answers
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Progress through the bank, counting the current question.
    pub fn percent(&self) -> u8 {
        let ratio = (self.current_index + 1) as f64 / self.questions.len() as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            index: self.current_index,
            total: self.total(),
            percent: self.percent(),
            question: self.current_question().clone(),
            selected: self.pending_selection.clone(),
            is_last: self.is_last(),
        }
    }

    /// Mark an option of the current question as selected.
    ///
    /// An id that is not one of the current question's options is rejected
    /// and the previous selection is kept.
    pub fn select_option(&mut self, option_id: &str) -> Result<(), QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        let question = self.current_question();
        if question.option(option_id).is_none() {
            return Err(QuizError::UnknownOption {
                question_id: question.id,
                option_id: option_id.to_string(),
            });
        }
        self.pending_selection = Some(option_id.to_string());
        Ok(())
    }

    /// Record the selected option and move on.
    ///
    /// Without a selection nothing changes and `NoSelection` is returned.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        let question = &self.questions[self.current_index];
        let option = self
            .pending_selection
            .as_deref()
            .and_then(|id| question.option(id))
            .ok_or(QuizError::NoSelection)?;

        self.collected_answers
            .push(Answer::from_selection(question, option));
        self.pending_selection = None;

        if self.is_last() {
            self.finished = true;
            Ok(Advance::Complete(std::mem::take(&mut self.collected_answers)))
        } else {
            self.current_index += 1;
            Ok(Advance::Next {
                index: self.current_index,
            })
        }
    }
}

impl Default for QuizRunner {
    fn default() -> Self {
        Self::new()
    }
}
