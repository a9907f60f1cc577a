//! TOML quiz catalog parser.
//!
//! Loads catalogs from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::model::{QuestionType, Quiz};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    catalog: Option<TomlCatalogHeader>,
    #[serde(default)]
    quizzes: Vec<Quiz>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    name: String,
    #[serde(default)]
    description: String,
}

/// Parse a single TOML file into a [`Catalog`].
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a [`Catalog`] (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let (name, description) = match parsed.catalog {
        Some(header) => (header.name, header.description),
        None => (
            source_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "catalog".to_string()),
            String::new(),
        ),
    };

    Ok(Catalog::new(name, description, parsed.quizzes))
}

/// Recursively load every `.toml` catalog file under `dir` into one catalog.
///
/// Files are visited in path order. Files that fail to parse are skipped.
pub fn load_catalog_directory(dir: &Path) -> Result<Catalog> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut quizzes = Vec::new();
    collect_quizzes(dir, &mut quizzes)?;

    let name = dir
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    Ok(Catalog::new(name, String::new(), quizzes))
}

fn collect_quizzes(dir: &Path, quizzes: &mut Vec<Quiz>) -> Result<()> {
    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_quizzes(&path, quizzes)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => quizzes.extend(catalog.into_quizzes()),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(())
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The quiz ID (if applicable).
    pub quiz_id: Option<String>,
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn quiz(quiz: &Quiz, message: String) -> Self {
        Self {
            quiz_id: Some(quiz.id.clone()),
            question_id: None,
            message,
        }
    }

    fn question(quiz: &Quiz, question_id: &str, message: String) -> Self {
        Self {
            quiz_id: Some(quiz.id.clone()),
            question_id: Some(question_id.to_string()),
            message,
        }
    }
}

/// Validate a catalog for common content mistakes.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate quiz IDs
    let mut seen_quizzes = HashSet::new();
    for quiz in catalog.list_all() {
        if !seen_quizzes.insert(&quiz.id) {
            warnings.push(ValidationWarning::quiz(
                quiz,
                format!("duplicate quiz ID: {}", quiz.id),
            ));
        }
    }

    for quiz in catalog.list_all() {
        warnings.extend(validate_quiz(quiz));
    }

    warnings
}

fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if !(0.0..=100.0).contains(&quiz.passing_score) {
        warnings.push(ValidationWarning::quiz(
            quiz,
            format!("passing_score {} is outside 0-100", quiz.passing_score),
        ));
    }

    let sum = quiz.question_points();
    if sum != u64::from(quiz.total_points) {
        warnings.push(ValidationWarning::quiz(
            quiz,
            format!(
                "total_points is {} but questions add up to {sum}",
                quiz.total_points
            ),
        ));
    }

    let mut seen_questions = HashSet::new();
    for question in &quiz.questions {
        let id = question.id.as_str();

        if !seen_questions.insert(id) {
            warnings.push(ValidationWarning::question(
                quiz,
                id,
                format!("duplicate question ID: {id}"),
            ));
        }

        if question.points == 0 {
            warnings.push(ValidationWarning::question(
                quiz,
                id,
                "question is worth zero points".into(),
            ));
        }

        let mut seen_options = HashSet::new();
        for option in &question.options {
            if !seen_options.insert(option.id.as_str()) {
                warnings.push(ValidationWarning::question(
                    quiz,
                    id,
                    format!("duplicate option ID: {}", option.id),
                ));
            }
        }

        if question.question_type.requires_correct_option()
            && question.correct_option_ids().next().is_none()
        {
            warnings.push(ValidationWarning::question(
                quiz,
                id,
                "no option is marked correct".into(),
            ));
        }

        match question.question_type {
            QuestionType::FillBlank
                if question
                    .correct_answer
                    .as_ref()
                    .and_then(|c| c.as_text())
                    .is_none() =>
            {
                warnings.push(ValidationWarning::question(
                    quiz,
                    id,
                    "fill-blank question has no text correct_answer".into(),
                ));
            }
            QuestionType::DragDrop if question.correct_answer.is_none() => {
                warnings.push(ValidationWarning::question(
                    quiz,
                    id,
                    "drag-drop question has no correct_answer".into(),
                ));
            }
            QuestionType::RatingScale if question.options.iter().any(|o| o.is_correct) => {
                warnings.push(ValidationWarning::question(
                    quiz,
                    id,
                    "rating-scale options should not be marked correct".into(),
                ));
            }
            _ => {}
        }
    }

    warnings
}
