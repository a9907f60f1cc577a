//! The `quizkit export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::Session;

pub fn execute(config_path: Option<PathBuf>, output: PathBuf) -> Result<()> {
    let session = Session::open(config_path)?;
    let data = session.store.export_all();

    let json = serde_json::to_string_pretty(&data)?;
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write export: {}", output.display()))?;

    println!("Exported {} record(s) to {}", data.len(), output.display());
    Ok(())
}
