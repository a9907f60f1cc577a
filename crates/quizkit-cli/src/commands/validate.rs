//! The `quizkit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::parser::validate_catalog;

use super::{load_catalog, Session};

pub fn execute(config_path: Option<PathBuf>, catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = match catalog_path {
        Some(path) => load_catalog(&path)?,
        None => Session::open(config_path)?.catalog()?,
    };

    println!("Catalog: {} ({} quizzes)", catalog.name(), catalog.len());

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        let prefix = match (&w.quiz_id, &w.question_id) {
            (Some(quiz), Some(question)) => format!("  [{quiz}/{question}]"),
            (Some(quiz), None) => format!("  [{quiz}]"),
            _ => "  ".to_string(),
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All quizzes valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
