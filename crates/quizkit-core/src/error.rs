//! Answer acceptance errors.
//!
//! Grading never fails; these errors only explain why a raw answer value was
//! rejected at the boundary where answers are accepted.

use thiserror::Error;

use crate::model::QuestionType;

/// Why a raw answer could not be accepted for a question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    /// No value (JSON `null`) was supplied.
    #[error("no answer given for question {question_id}")]
    Missing { question_id: String },

    /// The value has the wrong JSON shape for the question type.
    #[error("expected {expected} for {question_type} question {question_id}")]
    WrongShape {
        question_id: String,
        question_type: QuestionType,
        expected: &'static str,
    },

    /// The value has the right shape but is empty.
    #[error("empty answer for question {question_id}")]
    Empty { question_id: String },
}

impl AnswerError {
    /// The question the rejected answer was meant for.
    pub fn question_id(&self) -> &str {
        match self {
            AnswerError::Missing { question_id }
            | AnswerError::WrongShape { question_id, .. }
            | AnswerError::Empty { question_id } => question_id,
        }
    }
}
