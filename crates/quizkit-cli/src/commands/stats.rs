//! The `quizkit stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::time::{format_time, format_time_verbose};

use super::Session;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let session = Session::open(config_path)?;
    let stats = session.store.stats();

    if let Some(profile) = session.store.user_profile() {
        println!(
            "User: {} (last seen {})",
            profile.username,
            profile.last_login.format("%Y-%m-%d %H:%M")
        );
    }

    println!("Quizzes taken: {}", stats.total_quizzes);
    println!("Completed: {}", stats.completed_quizzes);
    println!("Average score: {:.2}%", stats.average_score);
    println!("Best score: {:.2}%", stats.best_score);
    println!("Time spent: {}", format_time_verbose(stats.total_time_spent));

    if !stats.category_stats.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Category", "Attempted", "Completed", "Average", "Best"]);
        for (category, c) in &stats.category_stats {
            table.add_row(vec![
                Cell::new(category.display_name()),
                Cell::new(c.attempted),
                Cell::new(c.completed),
                Cell::new(format!("{:.2}%", c.average_score)),
                Cell::new(format!("{:.2}%", c.best_score)),
            ]);
        }
        println!("\n{table}");
    }

    let attempts = session.store.attempts_for_user(&session.config.user_id);
    if !attempts.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Quiz", "Date", "Score", "Percentage", "Result", "Time"]);
        for attempt in &attempts {
            table.add_row(vec![
                Cell::new(&attempt.quiz_id),
                Cell::new(attempt.start_time.format("%Y-%m-%d %H:%M")),
                Cell::new(attempt.score),
                Cell::new(format!("{:.2}%", attempt.percentage)),
                Cell::new(if attempt.passed { "passed" } else { "failed" }),
                Cell::new(format_time(attempt.time_spent)),
            ]);
        }
        println!("\n{table}");
    }

    Ok(())
}
