//! Finished quiz attempts.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::answer::Answers;
use crate::grading::{all_answered, is_passed, score};
use crate::model::Quiz;
use crate::time::time_spent;

/// One user's graded run through a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub answers: Answers,
    /// Points earned.
    pub score: u64,
    /// Percentage of questions answered correctly.
    pub percentage: f64,
    /// Seconds between start and end.
    pub time_spent: u64,
    /// Every question was answered.
    pub completed: bool,
    pub passed: bool,
}

/// Grade `answers` and package the outcome as an [`Attempt`].
pub fn build_attempt(
    quiz_id: &str,
    user_id: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    answers: Answers,
    quiz: &Quiz,
) -> Attempt {
    let summary = score(quiz, &answers);
    let completed = all_answered(quiz, &answers);
    let passed = is_passed(quiz, summary.percentage);

    Attempt {
        id: generate_attempt_id(),
        quiz_id: quiz_id.to_string(),
        user_id: user_id.to_string(),
        start_time,
        end_time: Some(end_time),
        answers,
        score: summary.score,
        percentage: summary.percentage,
        time_spent: time_spent(start_time, end_time),
        completed,
        passed,
    }
}

/// `attempt_<unix millis>_<random suffix>`.
pub fn generate_attempt_id() -> String {
    prefixed_id("attempt")
}

/// `user_<unix millis>_<random suffix>`.
pub fn generate_user_id() -> String {
    prefixed_id("user")
}

fn prefixed_id(prefix: &str) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{prefix}_{}_{suffix}", Utc::now().timestamp_millis())
}
