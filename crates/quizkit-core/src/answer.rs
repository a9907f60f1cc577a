//! Typed answer values.
//!
//! Each question type has its own answer payload. Raw JSON coming from a UI
//! is converted once, in [`Answer::accept`], and everything downstream works
//! with the typed form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnswerError;
use crate::model::{Question, QuestionType, Quiz};

/// Answers keyed by question id.
pub type Answers = BTreeMap<String, Answer>;

/// A user's answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Option id picked for single-choice, true/false, and image-choice questions.
    Choice(String),
    /// Option ids picked for multiple-select questions.
    Selection(Vec<String>),
    /// Free text for fill-blank questions.
    Text(String),
    /// Scale value for rating-scale questions.
    Rating(String),
    /// Arbitrary structure for drag-drop questions.
    Match(Value),
}

impl Answer {
    /// Convert a raw JSON value into the answer variant for `question`.
    pub fn accept(question: &Question, raw: &Value) -> Result<Answer, AnswerError> {
        let question_id = question.id.clone();
        if raw.is_null() {
            return Err(AnswerError::Missing { question_id });
        }

        let wrong_shape = |expected: &'static str| AnswerError::WrongShape {
            question_id: question.id.clone(),
            question_type: question.question_type,
            expected,
        };

        match question.question_type {
            QuestionType::SingleChoice
            | QuestionType::TrueFalse
            | QuestionType::ImageChoice
            | QuestionType::FillBlank => {
                let Value::String(s) = raw else {
                    return Err(wrong_shape("a string"));
                };
                if s.trim().is_empty() {
                    return Err(AnswerError::Empty { question_id });
                }
                if question.question_type == QuestionType::FillBlank {
                    Ok(Answer::Text(s.clone()))
                } else {
                    Ok(Answer::Choice(s.clone()))
                }
            }
            QuestionType::MultipleSelect => {
                let Value::Array(items) = raw else {
                    return Err(wrong_shape("an array of option ids"));
                };
                if items.is_empty() {
                    return Err(AnswerError::Empty { question_id });
                }
                let ids = items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| wrong_shape("an array of option ids"))?;
                Ok(Answer::Selection(ids))
            }
            QuestionType::RatingScale => match raw {
                Value::String(s) if s.is_empty() => Err(AnswerError::Empty { question_id }),
                Value::String(s) => Ok(Answer::Rating(s.clone())),
                Value::Number(n) => Ok(Answer::Rating(n.to_string())),
                _ => Err(wrong_shape("a string or number")),
            },
            QuestionType::DragDrop => match raw {
                Value::Array(_) | Value::Object(_) => Ok(Answer::Match(raw.clone())),
                _ => Err(wrong_shape("an array or object")),
            },
        }
    }

    /// Whether the answer carries a value (non-empty text or selection).
    pub fn is_present(&self) -> bool {
        match self {
            Answer::Choice(s) | Answer::Text(s) | Answer::Rating(s) => !s.is_empty(),
            Answer::Selection(ids) => !ids.is_empty(),
            Answer::Match(v) => !v.is_null(),
        }
    }

    /// Raw JSON form of the answer payload, without the variant tag.
    pub fn to_raw(&self) -> Value {
        match self {
            Answer::Choice(s) | Answer::Text(s) | Answer::Rating(s) => Value::String(s.clone()),
            Answer::Selection(ids) => {
                Value::Array(ids.iter().cloned().map(Value::String).collect())
            }
            Answer::Match(v) => v.clone(),
        }
    }
}

/// Accept a map of raw answers against a quiz.
///
/// Values for unknown question ids are ignored. Rejected values are returned
/// alongside the accepted ones so the caller can report them.
pub fn accept_answers(quiz: &Quiz, raw: &BTreeMap<String, Value>) -> (Answers, Vec<AnswerError>) {
    let mut answers = Answers::new();
    let mut rejected = Vec::new();

    for question in &quiz.questions {
        let Some(value) = raw.get(&question.id) else {
            continue;
        };
        match Answer::accept(question, value) {
            Ok(answer) => {
                answers.insert(question.id.clone(), answer);
            }
            Err(e) => rejected.push(e),
        }
    }

    for id in raw.keys() {
        if quiz.question(id).is_none() {
            tracing::debug!("ignoring answer for unknown question {id} in quiz {}", quiz.id);
        }
    }

    (answers, rejected)
}
