//! The `quizkit reset` command.

use std::path::PathBuf;

use anyhow::Result;

use super::Session;

pub fn execute(config_path: Option<PathBuf>, progress_only: bool) -> Result<()> {
    let mut session = Session::open(config_path)?;

    if progress_only {
        session.store.clear_all_progress();
        println!("Cleared in-progress quizzes.");
    } else {
        session.store.clear_all();
        println!("Cleared all stored data.");
    }

    Ok(())
}
