//! quizkit CLI — grade quizzes and track progress locally.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use quizkit_core::listing::SortBy;
use quizkit_core::model::{Category, Difficulty};
use quizkit_core::user::Theme;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Quiz grading and local progress tracking")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List quizzes in the catalog
    List {
        /// Only quizzes of this category (e.g. "science")
        #[arg(long)]
        category: Option<Category>,

        /// Only quizzes of this difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Case-insensitive search in title, description, and tags
        #[arg(long)]
        search: Option<String>,

        /// Only quizzes carrying one of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Sort order: title, difficulty, created, popularity
        #[arg(long, default_value = "title")]
        sort: SortBy,

        /// Shuffle the listing instead of sorting it
        #[arg(long, conflicts_with = "sort")]
        shuffle: bool,
    },

    /// Show a quiz and its attempt history
    Show {
        /// Quiz id
        #[arg(long)]
        quiz: String,
    },

    /// Grade a JSON file of answers against a quiz
    Grade {
        /// Quiz id
        #[arg(long)]
        quiz: String,

        /// JSON object mapping question ids to answers
        #[arg(long)]
        answers: PathBuf,

        /// Seconds spent on the quiz
        #[arg(long, default_value = "0")]
        duration: u32,

        /// Save the attempt and update statistics
        #[arg(long)]
        record: bool,
    },

    /// Show aggregate statistics
    Stats,

    /// Show or update preferences
    Prefs {
        /// light or dark
        #[arg(long)]
        theme: Option<Theme>,

        #[arg(long)]
        sound: Option<bool>,

        #[arg(long)]
        auto_submit: Option<bool>,

        /// Show explanations for missed questions after grading
        #[arg(long)]
        explanations: Option<bool>,

        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Preferred categories (replaces the current list)
        #[arg(long = "category")]
        categories: Vec<Category>,
    },

    /// Write all stored data to a JSON file
    Export {
        #[arg(long)]
        output: PathBuf,
    },

    /// Restore stored data from a JSON export
    Import {
        #[arg(long)]
        input: PathBuf,
    },

    /// Delete stored data
    Reset {
        /// Only discard in-progress quizzes
        #[arg(long)]
        progress_only: bool,
    },

    /// Validate quiz catalog TOML files
    Validate {
        /// Catalog file or directory (defaults to the configured catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Create a starter config and example catalog
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizkit=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::List {
            category,
            difficulty,
            search,
            tags,
            sort,
            shuffle,
        } => commands::list::execute(
            config,
            commands::list::ListArgs {
                category,
                difficulty,
                search,
                tags,
                sort,
                shuffle,
            },
        ),
        Commands::Show { quiz } => commands::show::execute(config, quiz),
        Commands::Grade {
            quiz,
            answers,
            duration,
            record,
        } => commands::grade::execute(config, quiz, answers, duration, record),
        Commands::Stats => commands::stats::execute(config),
        Commands::Prefs {
            theme,
            sound,
            auto_submit,
            explanations,
            difficulty,
            categories,
        } => commands::prefs::execute(
            config,
            commands::prefs::PrefsArgs {
                theme,
                sound,
                auto_submit,
                explanations,
                difficulty,
                categories,
            },
        ),
        Commands::Export { output } => commands::export::execute(config, output),
        Commands::Import { input } => commands::import::execute(config, input),
        Commands::Reset { progress_only } => commands::reset::execute(config, progress_only),
        Commands::Validate { catalog } => commands::validate::execute(config, catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
