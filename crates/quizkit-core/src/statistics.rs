//! Aggregate quiz statistics.
//!
//! Statistics are folded in one attempt at a time. Only completed attempts
//! contribute to averages, so a running average never divides by zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attempt::Attempt;
use crate::model::Category;

/// Totals across every recorded attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    pub total_quizzes: u32,
    pub completed_quizzes: u32,
    /// Mean percentage over completed attempts.
    pub average_score: f64,
    /// Highest percentage of any attempt.
    pub best_score: f64,
    /// Seconds.
    pub total_time_spent: u64,
    #[serde(default)]
    pub category_stats: BTreeMap<Category, CategoryStats>,
}

/// Per-category breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub attempted: u32,
    pub completed: u32,
    pub average_score: f64,
    pub best_score: f64,
}

impl QuizStats {
    /// Fold one attempt into the totals.
    ///
    /// `category` is the category of the attempted quiz; without it only the
    /// global totals change.
    pub fn record(&mut self, attempt: &Attempt, category: Option<Category>) {
        self.total_quizzes += 1;
        self.total_time_spent += attempt.time_spent;
        self.best_score = self.best_score.max(attempt.percentage);
        if attempt.completed {
            self.completed_quizzes += 1;
            self.average_score =
                running_average(self.average_score, self.completed_quizzes, attempt.percentage);
        }

        if let Some(category) = category {
            self.category_stats
                .entry(category)
                .or_default()
                .record(attempt);
        }
    }
}

impl CategoryStats {
    fn record(&mut self, attempt: &Attempt) {
        self.attempted += 1;
        self.best_score = self.best_score.max(attempt.percentage);
        if attempt.completed {
            self.completed += 1;
            self.average_score =
                running_average(self.average_score, self.completed, attempt.percentage);
        }
    }
}

/// New mean after adding `value` as the `count`-th sample. `count` must be ≥ 1.
fn running_average(previous: f64, count: u32, value: f64) -> f64 {
    debug_assert!(count >= 1);
    let n = count as f64;
    (previous * (n - 1.0) + value) / n
}
