//! In-flight quiz progress and question navigation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::answer::Answers;

/// State of a quiz that has been started but not yet submitted.
///
/// One per quiz id; replaced on every save and discarded once the quiz is
/// turned into an [`Attempt`](crate::attempt::Attempt).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizProgress {
    pub current_question_index: usize,
    #[serde(default)]
    pub answers: Answers,
    pub start_time: DateTime<Utc>,
    /// Accumulated seconds, excluding paused time.
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub is_paused: bool,
}

impl QuizProgress {
    /// Fresh progress at the first question.
    pub fn start(start_time: DateTime<Utc>) -> Self {
        Self {
            current_question_index: 0,
            answers: Answers::new(),
            start_time,
            time_spent: 0,
            is_paused: false,
        }
    }

    /// Move to the next question, staying on the last one.
    pub fn advance(&mut self, total_questions: usize) {
        self.current_question_index = next_index(self.current_question_index, total_questions);
    }

    /// Move to the previous question, staying on the first one.
    pub fn retreat(&mut self) {
        self.current_question_index = previous_index(self.current_question_index);
    }
}

/// Index of the next question, clamped to the last question.
pub fn next_index(current: usize, total_questions: usize) -> usize {
    (current + 1).min(total_questions.saturating_sub(1))
}

/// Index of the previous question, clamped to zero.
pub fn previous_index(current: usize) -> usize {
    current.saturating_sub(1)
}

/// Position in the quiz as a whole percentage: `(current + 1) / total`.
pub fn progress_percentage(current: usize, total_questions: usize) -> u32 {
    if total_questions == 0 {
        return 0;
    }
    ((current + 1) as f64 / total_questions as f64 * 100.0).round() as u32
}
