//! The `quizkit import` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;

use super::Session;

pub fn execute(config_path: Option<PathBuf>, input: PathBuf) -> Result<()> {
    let mut session = Session::open(config_path)?;

    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read import: {}", input.display()))?;
    let data: BTreeMap<String, Value> = serde_json::from_str(&content)
        .with_context(|| format!("import must be a JSON object: {}", input.display()))?;

    session.store.import_all(&data);
    println!("Imported {} record(s) from {}", data.len(), input.display());
    Ok(())
}
