//! The `quizkit grade` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use comfy_table::{Cell, Table};
use serde_json::Value;

use quizkit_core::answer::{accept_answers, Answer};
use quizkit_core::attempt::build_attempt;
use quizkit_core::grading::{is_correct, unanswered};
use quizkit_core::model::Question;
use quizkit_core::time::format_time;
use quizkit_core::user::UserProfile;
use quizkit_store::QuizStore;

use super::{find_quiz, Session};

pub fn execute(
    config_path: Option<PathBuf>,
    quiz_id: String,
    answers_path: PathBuf,
    duration_secs: u32,
    record: bool,
) -> Result<()> {
    let mut session = Session::open(config_path)?;
    let catalog = session.catalog()?;
    let quiz = find_quiz(&catalog, &quiz_id)?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let raw: BTreeMap<String, Value> = serde_json::from_str(&content)
        .with_context(|| format!("answers must be a JSON object: {}", answers_path.display()))?;

    let (answers, rejected) = accept_answers(quiz, &raw);
    for e in &rejected {
        println!("  [{}] WARNING: {e}", e.question_id());
    }

    let end = Utc::now();
    let elapsed = TimeDelta::try_seconds(i64::from(duration_secs))
        .context("duration out of range")?;
    let attempt = build_attempt(&quiz.id, &session.config.user_id, end - elapsed, end, answers, quiz);

    let show_explanations = session.store.preferences().show_explanations;
    let mut table = Table::new();
    table.set_header(vec!["Question", "Points", "Answer", "Result"]);
    let mut missed = Vec::new();
    for question in &quiz.questions {
        let answer = attempt.answers.get(&question.id).filter(|a| a.is_present());
        let result = match answer {
            None => "unanswered",
            Some(a) if is_correct(question, a) => "correct",
            Some(_) => "incorrect",
        };
        if result != "correct" {
            missed.push(question);
        }
        table.add_row(vec![
            Cell::new(&question.id),
            Cell::new(question.points),
            Cell::new(answer.map(display_answer).unwrap_or_default()),
            Cell::new(result),
        ]);
    }
    println!("{table}");

    if show_explanations {
        print_explanations(&missed);
    }

    let pending = unanswered(quiz, &attempt.answers);
    if !pending.is_empty() {
        let ids: Vec<&str> = pending.iter().map(|q| q.id.as_str()).collect();
        println!("Unanswered: {}", ids.join(", "));
    }

    println!("Score: {}/{} points", attempt.score, quiz.question_points());
    println!("Percentage: {:.2}%", attempt.percentage);
    println!(
        "Result: {} (pass mark {}%)",
        if attempt.passed { "PASSED" } else { "FAILED" },
        quiz.passing_score
    );
    println!("Time: {}", format_time(attempt.time_spent));

    if record {
        touch_profile(&mut session.store, &session.config.user_id);
        session.store.finish_attempt(&attempt, Some(quiz.category));
        println!("Recorded attempt {}", attempt.id);
    }

    Ok(())
}

fn display_answer(answer: &Answer) -> String {
    match answer.to_raw() {
        Value::String(s) => s,
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn print_explanations(missed: &[&Question]) {
    let explained: Vec<_> = missed
        .iter()
        .filter_map(|q| q.explanation.as_deref().map(|e| (q.id.as_str(), e)))
        .collect();
    if explained.is_empty() {
        return;
    }
    println!("Explanations:");
    for (id, explanation) in explained {
        println!("  [{id}] {explanation}");
    }
}

/// Create the local profile on first use, otherwise refresh its last login.
fn touch_profile(store: &mut QuizStore, user_id: &str) {
    let profile = match store.user_profile() {
        Some(mut profile) if profile.id == user_id => {
            profile.last_login = Utc::now();
            profile
        }
        _ => UserProfile::new(user_id, user_id),
    };
    store.set_user_profile(&profile);
}
