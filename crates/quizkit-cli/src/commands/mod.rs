//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizkit_core::catalog::Catalog;
use quizkit_core::model::Quiz;
use quizkit_core::parser::{load_catalog_directory, parse_catalog};
use quizkit_store::{create_storage, load_config_from, QuizStore, QuizkitConfig};

pub mod export;
pub mod grade;
pub mod import;
pub mod init;
pub mod list;
pub mod prefs;
pub mod reset;
pub mod show;
pub mod stats;
pub mod validate;

/// Loaded configuration plus the catalog and store it points at.
pub struct Session {
    pub config: QuizkitConfig,
    pub store: QuizStore,
}

impl Session {
    pub fn open(config_path: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let store = QuizStore::new(create_storage(&config.storage));
        tracing::debug!("using {} storage for user {}", store.provider().name(), config.user_id);
        Ok(Self { config, store })
    }

    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog_dir {
            Some(dir) => load_catalog(dir),
            None => Ok(Catalog::builtin()),
        }
    }
}

/// Load a catalog from a TOML file or a directory of them.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if path.is_dir() {
        load_catalog_directory(path)
    } else {
        parse_catalog(path)
    }
}

pub fn find_quiz<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Quiz> {
    catalog
        .by_id(id)
        .with_context(|| format!("quiz not found: {id}"))
}
