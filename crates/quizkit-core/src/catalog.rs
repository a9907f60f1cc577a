//! Read-only quiz catalog.
//!
//! A [`Catalog`] is fixed once built. Lookups that find nothing return
//! `None` or an empty list.

use std::path::Path;

use crate::model::{Category, Difficulty, Quiz};
use crate::parser::parse_catalog_str;

const BUILTIN_CATALOG: &str = include_str!("../data/sample_quizzes.toml");

/// An ordered, immutable collection of quizzes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    name: String,
    description: String,
    quizzes: Vec<Quiz>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, description: impl Into<String>, quizzes: Vec<Quiz>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            quizzes,
        }
    }

    /// The sample quizzes bundled with the crate.
    pub fn builtin() -> Self {
        match parse_catalog_str(BUILTIN_CATALOG, Path::new("sample_quizzes.toml")) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!("bundled catalog failed to parse: {e:#}");
                Catalog::default()
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// Every quiz, in catalog order.
    pub fn list_all(&self) -> &[Quiz] {
        &self.quizzes
    }

    /// Quizzes of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> Vec<&Quiz> {
        self.quizzes
            .iter()
            .filter(|q| q.category == category)
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    /// Distinct categories present in the catalog, in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for quiz in &self.quizzes {
            if !categories.contains(&quiz.category) {
                categories.push(quiz.category);
            }
        }
        categories
    }

    pub(crate) fn into_quizzes(self) -> Vec<Quiz> {
        self.quizzes
    }
}

/// Display label of a category.
pub fn display_name(category: Category) -> &'static str {
    category.display_name()
}

/// Display label of a raw category string; unknown values are returned as-is.
pub fn display_name_for(raw: &str) -> String {
    raw.parse::<Category>()
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Style classes for a difficulty badge.
pub fn difficulty_style_class(difficulty: Difficulty) -> &'static str {
    difficulty.style_class()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::validate_catalog;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.name(), "Sample Quizzes");
        assert!(validate_catalog(&catalog).is_empty());
        for quiz in catalog.list_all() {
            assert_eq!(u64::from(quiz.total_points), quiz.question_points(), "{}", quiz.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.by_id("science-general-1").unwrap().title,
            "General Science"
        );
        assert!(catalog.by_id("missing").is_none());
    }

    #[test]
    fn lookup_by_category_preserves_order() {
        let catalog = Catalog::builtin();
        let science = catalog.by_category(Category::Science);
        assert_eq!(science.len(), 1);
        assert_eq!(science[0].id, "science-general-1");
        assert!(catalog.by_category(Category::Sports).is_empty());
    }

    #[test]
    fn categories_are_distinct_and_present_only() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.categories(),
            vec![
                Category::Mathematics,
                Category::Science,
                Category::History,
                Category::Programming,
                Category::Personality,
            ]
        );
        assert!(Catalog::default().categories().is_empty());
    }

    #[test]
    fn display_names_and_styles() {
        assert_eq!(display_name(Category::GeneralKnowledge), "General Knowledge");
        assert_eq!(display_name_for("trivia"), "Trivia");
        assert_eq!(display_name_for("astrology"), "astrology");
        assert_eq!(
            difficulty_style_class(Difficulty::Easy),
            "text-green-600 bg-green-100"
        );
        assert_eq!(difficulty_style_class(Difficulty::Hard), "text-red-600 bg-red-100");
    }
}
