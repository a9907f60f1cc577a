//! The `quizkit show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::time::{format_time, format_time_verbose};

use super::{find_quiz, Session};

pub fn execute(config_path: Option<PathBuf>, quiz_id: String) -> Result<()> {
    let session = Session::open(config_path)?;
    let catalog = session.catalog()?;
    let quiz = find_quiz(&catalog, &quiz_id)?;

    println!("{} ({})", quiz.title, quiz.id);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    println!(
        "Category: {}  Difficulty: {}  Points: {}  Pass: {}%",
        quiz.category.display_name(),
        quiz.difficulty,
        quiz.total_points,
        quiz.passing_score
    );
    if let Some(limit) = quiz.time_limit {
        println!("Time limit: {}", format_time_verbose(u64::from(limit)));
    }
    if !quiz.tags.is_empty() {
        println!("Tags: {}", quiz.tags.join(", "));
    }

    println!();
    for (i, question) in quiz.questions.iter().enumerate() {
        println!(
            "{}. [{}] {} ({} pts, {})",
            i + 1,
            question.id,
            question.prompt,
            question.points,
            question.question_type.display_name()
        );
        for option in &question.options {
            println!("     {}) {}", option.id, option.text);
        }
    }

    let attempts = session.store.attempts_for_quiz(&quiz.id);
    if let Some(progress) = session.store.progress(&quiz.id) {
        println!(
            "\nIn progress: question {} of {}",
            progress.current_question_index + 1,
            quiz.questions.len()
        );
    }
    if attempts.is_empty() {
        println!("\nNo attempts yet.");
    } else {
        println!("\nAttempts: {}", attempts.len());
        for attempt in &attempts {
            println!(
                "  {}  {:.2}%  {}  {}",
                attempt.start_time.format("%Y-%m-%d %H:%M"),
                attempt.percentage,
                if attempt.passed { "passed" } else { "failed" },
                format_time(attempt.time_spent)
            );
        }
    }

    Ok(())
}
