//! Core data model types for quizkit.
//!
//! Quizzes, questions, and options are immutable catalog content; everything
//! the user produces (answers, attempts, progress) lives in other modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A quiz: an ordered collection of graded questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Short description shown in listings.
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Questions in presentation order.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Overall time limit in seconds.
    #[serde(default)]
    pub time_limit: Option<u32>,
    /// Minimum percentage (0-100) of correct questions needed to pass.
    pub passing_score: f64,
    /// Declared total points. Expected to equal the sum of question points.
    pub total_points: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Quiz {
    /// Sum of the points of every question in the quiz, widened to `u64`.
    pub fn question_points(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.points)).sum()
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// A single question inside a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the quiz.
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// The prompt shown to the user.
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<QuizOption>,
    /// Canonical answer for fill-blank and drag-drop questions.
    #[serde(default)]
    pub correct_answer: Option<CorrectAnswer>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub points: u32,
    /// Per-question time limit in seconds.
    #[serde(default)]
    pub time_limit: Option<u32>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Question {
    /// Ids of every option flagged correct, in option order.
    pub fn correct_option_ids(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.id.as_str())
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// The designated correct answer of a fill-blank or drag-drop question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Text(String),
    List(Vec<String>),
}

impl CorrectAnswer {
    /// The answer as plain text, if it is not a list.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CorrectAnswer::Text(s) => Some(s),
            CorrectAnswer::List(_) => None,
        }
    }

    /// JSON form used for structural comparison.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CorrectAnswer::Text(s) => serde_json::Value::String(s.clone()),
            CorrectAnswer::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect(),
            ),
        }
    }
}

/// The seven supported question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// One option is picked from a list.
    #[serde(rename = "multiple-choice", alias = "single-choice")]
    SingleChoice,
    MultipleSelect,
    TrueFalse,
    FillBlank,
    ImageChoice,
    DragDrop,
    RatingScale,
}

impl QuestionType {
    pub const ALL: [QuestionType; 7] = [
        QuestionType::SingleChoice,
        QuestionType::MultipleSelect,
        QuestionType::TrueFalse,
        QuestionType::FillBlank,
        QuestionType::ImageChoice,
        QuestionType::DragDrop,
        QuestionType::RatingScale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "multiple-choice",
            QuestionType::MultipleSelect => "multiple-select",
            QuestionType::TrueFalse => "true-false",
            QuestionType::FillBlank => "fill-blank",
            QuestionType::ImageChoice => "image-choice",
            QuestionType::DragDrop => "drag-drop",
            QuestionType::RatingScale => "rating-scale",
        }
    }

    /// Label used in question headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "Multiple Choice",
            QuestionType::MultipleSelect => "Multiple Select",
            QuestionType::TrueFalse => "True/False",
            QuestionType::FillBlank => "Fill in the Blank",
            QuestionType::ImageChoice => "Image Choice",
            QuestionType::DragDrop => "Drag & Drop",
            QuestionType::RatingScale => "Rating Scale",
        }
    }

    /// Whether questions of this type must flag at least one option correct.
    pub fn requires_correct_option(&self) -> bool {
        matches!(
            self,
            QuestionType::SingleChoice
                | QuestionType::MultipleSelect
                | QuestionType::TrueFalse
                | QuestionType::ImageChoice
        )
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple-choice" | "single-choice" => Ok(QuestionType::SingleChoice),
            "multiple-select" => Ok(QuestionType::MultipleSelect),
            "true-false" => Ok(QuestionType::TrueFalse),
            "fill-blank" => Ok(QuestionType::FillBlank),
            "image-choice" => Ok(QuestionType::ImageChoice),
            "drag-drop" => Ok(QuestionType::DragDrop),
            "rating-scale" => Ok(QuestionType::RatingScale),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Display label for a raw question type string, falling back to the input.
pub fn question_type_display_name(raw: &str) -> String {
    raw.parse::<QuestionType>()
        .map(|t| t.display_name().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Difficulty of a quiz or question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Weight used when averaging question difficulty.
    pub fn weight(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// CSS utility classes for difficulty badges.
    pub fn style_class(&self) -> &'static str {
        match self {
            Difficulty::Easy => "text-green-600 bg-green-100",
            Difficulty::Medium => "text-yellow-600 bg-yellow-100",
            Difficulty::Hard => "text-red-600 bg-red-100",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Quiz categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Mathematics,
    Science,
    History,
    Geography,
    Literature,
    GeneralKnowledge,
    Technology,
    Sports,
    Entertainment,
    Programming,
    Business,
    Languages,
    Personality,
    Trivia,
    Custom,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Mathematics,
        Category::Science,
        Category::History,
        Category::Geography,
        Category::Literature,
        Category::GeneralKnowledge,
        Category::Technology,
        Category::Sports,
        Category::Entertainment,
        Category::Programming,
        Category::Business,
        Category::Languages,
        Category::Personality,
        Category::Trivia,
        Category::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mathematics => "mathematics",
            Category::Science => "science",
            Category::History => "history",
            Category::Geography => "geography",
            Category::Literature => "literature",
            Category::GeneralKnowledge => "general-knowledge",
            Category::Technology => "technology",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Programming => "programming",
            Category::Business => "business",
            Category::Languages => "languages",
            Category::Personality => "personality",
            Category::Trivia => "trivia",
            Category::Custom => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Mathematics => "Mathematics",
            Category::Science => "Science",
            Category::History => "History",
            Category::Geography => "Geography",
            Category::Literature => "Literature",
            Category::GeneralKnowledge => "General Knowledge",
            Category::Technology => "Technology",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::Programming => "Programming",
            Category::Business => "Business",
            Category::Languages => "Languages",
            Category::Personality => "Personality",
            Category::Trivia => "Trivia",
            Category::Custom => "Custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

fn default_true() -> bool {
    true
}
