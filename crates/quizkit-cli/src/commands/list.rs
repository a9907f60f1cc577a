//! The `quizkit list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::listing::{filter_quizzes, shuffle, sort_quizzes, QuizFilter, SortBy};
use quizkit_core::model::{Category, Difficulty, Quiz};

use super::Session;

pub struct ListArgs {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub sort: SortBy,
    pub shuffle: bool,
}

pub fn execute(config_path: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let session = Session::open(config_path)?;
    let catalog = session.catalog()?;

    let filter = QuizFilter {
        category: args.category,
        difficulty: args.difficulty,
        search: args.search,
        tags: args.tags,
    };
    let all: Vec<&Quiz> = catalog.list_all().iter().collect();
    let matching = filter_quizzes(&all, &filter);
    let quizzes = if args.shuffle {
        shuffle(&matching)
    } else {
        sort_quizzes(&matching, args.sort)
    };

    if quizzes.is_empty() {
        println!("No quizzes match.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Title",
        "Category",
        "Difficulty",
        "Questions",
        "Points",
        "Pass %",
    ]);
    for quiz in &quizzes {
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.title),
            Cell::new(quiz.category.display_name()),
            Cell::new(quiz.difficulty),
            Cell::new(quiz.questions.len()),
            Cell::new(quiz.total_points),
            Cell::new(format!("{:.0}%", quiz.passing_score)),
        ]);
    }

    println!("{table}");
    println!("{} of {} quizzes", quizzes.len(), catalog.len());
    Ok(())
}
