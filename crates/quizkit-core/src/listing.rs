//! Sorting, filtering, and shuffling quiz listings.

use std::cmp::Ordering;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Category, Difficulty, Quiz};

/// Mean difficulty weight of a quiz's questions (easy=1, medium=2, hard=3).
///
/// An empty quiz scores zero.
pub fn difficulty_score(quiz: &Quiz) -> f64 {
    if quiz.questions.is_empty() {
        return 0.0;
    }
    let total: u32 = quiz.questions.iter().map(|q| q.difficulty.weight()).sum();
    total as f64 / quiz.questions.len() as f64
}

/// Sort orders for quiz listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Lexicographic by title.
    Title,
    /// Ascending by [`difficulty_score`].
    Difficulty,
    /// Newest first.
    Created,
    /// Needs attempt counts, which the catalog does not have; keeps input order.
    Popularity,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortBy::Title),
            "difficulty" => Ok(SortBy::Difficulty),
            "created" | "newest" => Ok(SortBy::Created),
            "popularity" | "popular" => Ok(SortBy::Popularity),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Return the quizzes sorted by `sort_by`. The sort is stable.
pub fn sort_quizzes<'a>(quizzes: &[&'a Quiz], sort_by: SortBy) -> Vec<&'a Quiz> {
    let mut sorted = quizzes.to_vec();
    match sort_by {
        SortBy::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortBy::Difficulty => sorted.sort_by(|a, b| {
            difficulty_score(a)
                .partial_cmp(&difficulty_score(b))
                .unwrap_or(Ordering::Equal)
        }),
        SortBy::Created => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Popularity => {}
    }
    sorted
}

/// Criteria for [`filter_quizzes`]. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct QuizFilter {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    /// Case-insensitive substring of title, description, or any tag.
    pub search: Option<String>,
    /// At least one of these (lowercased) must be among the quiz tags.
    pub tags: Vec<String>,
}

impl QuizFilter {
    pub fn matches(&self, quiz: &Quiz) -> bool {
        if self.category.is_some_and(|c| c != quiz.category) {
            return false;
        }
        if self.difficulty.is_some_and(|d| d != quiz.difficulty) {
            return false;
        }
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let hit = quiz.title.to_lowercase().contains(&term)
                || quiz.description.to_lowercase().contains(&term)
                || quiz.tags.iter().any(|t| t.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
        if !self.tags.is_empty() {
            let hit = self
                .tags
                .iter()
                .any(|wanted| quiz.tags.contains(&wanted.to_lowercase()));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Quizzes matching every criterion of `filter`, in input order.
pub fn filter_quizzes<'a>(quizzes: &[&'a Quiz], filter: &QuizFilter) -> Vec<&'a Quiz> {
    quizzes
        .iter()
        .copied()
        .filter(|q| filter.matches(q))
        .collect()
}

/// Uniformly shuffled copy of `items`.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Shuffled copy of `items` using the given RNG.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
