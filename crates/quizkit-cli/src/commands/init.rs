//! The `quizkit init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    std::fs::create_dir_all("catalogs")?;
    let example_path = Path::new("catalogs/example.toml");
    if example_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizkit validate --catalog catalogs/example.toml");
    println!("  2. Uncomment catalog_dir in quizkit.toml to use your own quizzes");
    println!("  3. Run: quizkit list");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

# Id recorded on attempts.
user_id = "local"

# Directory of TOML quiz catalogs. The bundled sample quizzes are used when unset.
# catalog_dir = "catalogs"

[storage]
type = "file"
dir = "./quizkit-data"
"#;

const EXAMPLE_CATALOG: &str = r#"[catalog]
name = "Example Catalog"
description = "A small catalog to get started"

[[quizzes]]
id = "example-geography"
title = "Capitals"
description = "Name the capital"
category = "geography"
difficulty = "easy"
passing_score = 50.0
total_points = 20
tags = ["example"]

[[quizzes.questions]]
id = "geo-q1"
type = "multiple-choice"
question = "What is the capital of Italy?"
points = 10
difficulty = "easy"
explanation = "Rome has been the capital since 1871."
options = [
    { id = "a", text = "Milan" },
    { id = "b", text = "Rome", is_correct = true },
    { id = "c", text = "Naples" },
]

[[quizzes.questions]]
id = "geo-q2"
type = "fill-blank"
question = "The capital of Japan is ____."
correct_answer = "Tokyo"
points = 10
difficulty = "easy"
"#;
