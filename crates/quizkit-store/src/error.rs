//! Storage provider error types.
//!
//! Providers report faults with these errors; [`QuizStore`](crate::QuizStore)
//! catches them at its boundary and never passes them on.

use thiserror::Error;

/// Errors a storage provider can report.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be used by this provider.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Writing the value would exceed the provider's size limit.
    #[error("quota exceeded writing {key}: {needed} bytes needed, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// An I/O error from a file-backed provider.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}
