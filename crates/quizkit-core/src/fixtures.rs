//! Shared builders for unit tests.

use chrono::{TimeZone, Utc};

use crate::answer::{Answer, Answers};
use crate::model::{Category, Difficulty, Question, Quiz};

pub fn quiz_with(questions: Vec<Question>, passing_score: f64) -> Quiz {
    let total_points = questions
        .iter()
        .fold(0u32, |sum, q| sum.saturating_add(q.points));
    Quiz {
        id: "fixture".into(),
        title: "Fixture".into(),
        description: "A quiz built for tests".into(),
        category: Category::Trivia,
        difficulty: Difficulty::Medium,
        questions,
        time_limit: None,
        passing_score,
        total_points,
        image_url: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        created_by: None,
        is_public: true,
        tags: vec![],
    }
}

pub fn answers(pairs: &[(&str, Answer)]) -> Answers {
    pairs
        .iter()
        .map(|(id, answer)| (id.to_string(), answer.clone()))
        .collect()
}
