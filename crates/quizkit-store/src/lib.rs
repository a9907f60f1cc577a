//! quizkit-store — Persistence of quiz attempts, progress, and statistics.
//!
//! [`QuizStore`] keeps typed quiz records in a flat key/value
//! [`StorageProvider`]. Storage faults are logged and absorbed, so a broken
//! or missing backend degrades to default values instead of errors.

pub mod config;
pub mod error;
pub mod file;
pub mod keys;
pub mod provider;
pub mod store;

pub use config::{create_storage, load_config, load_config_from, QuizkitConfig, StorageConfig};
pub use error::StorageError;
pub use file::FileStorage;
pub use keys::StorageKey;
pub use provider::{MemoryStorage, NoopStorage, StorageProvider};
pub use store::{ProgressMap, QuizStore};
