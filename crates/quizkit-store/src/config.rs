//! quizkit configuration and storage factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::file::FileStorage;
use crate::provider::{MemoryStorage, NoopStorage, StorageProvider};

/// Environment variable that overrides the file storage directory.
pub const DATA_DIR_ENV: &str = "QUIZKIT_DATA_DIR";

/// Where quiz data is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// One JSON file per record in `dir`.
    File {
        #[serde(default = "default_data_dir")]
        dir: PathBuf,
    },
    /// Process memory; nothing survives the process.
    Memory {
        #[serde(default)]
        quota_bytes: Option<usize>,
    },
    /// No storage: reads return defaults and writes are dropped.
    None,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File {
            dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./quizkit-data")
}

/// Top-level quizkit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Id recorded on attempts.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Directory of TOML catalogs; the bundled catalog is used when unset.
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_user_id() -> String {
    "local".to_string()
}

impl Default for QuizkitConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            catalog_dir: None,
            storage: StorageConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(&rest[start + 2..start + len]).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

impl QuizkitConfig {
    /// Resolve `${VAR}` references and apply the data directory override.
    fn resolve(mut self, data_dir_override: Option<String>) -> Self {
        self.user_id = resolve_env_vars(&self.user_id);
        self.catalog_dir = self.catalog_dir.as_deref().map(resolve_path);
        if let StorageConfig::File { dir } = &mut self.storage {
            *dir = resolve_path(dir);
        }

        if let Some(dir) = data_dir_override.filter(|d| !d.is_empty()) {
            if !matches!(self.storage, StorageConfig::File { .. }) {
                tracing::info!("{DATA_DIR_ENV} is set, switching to file storage");
            }
            self.storage = StorageConfig::File {
                dir: PathBuf::from(dir),
            };
        }
        self
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// `QUIZKIT_DATA_DIR` overrides the storage directory.
pub fn load_config() -> Result<QuizkitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizkit.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };

    Ok(config.resolve(std::env::var(DATA_DIR_ENV).ok()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}

/// Create a storage provider from its configuration.
pub fn create_storage(config: &StorageConfig) -> Box<dyn StorageProvider> {
    match config {
        StorageConfig::File { dir } => Box::new(FileStorage::new(dir)),
        StorageConfig::Memory { quota_bytes } => {
            let storage = MemoryStorage::new();
            match quota_bytes {
                Some(bytes) => Box::new(storage.with_quota(*bytes)),
                None => Box::new(storage),
            }
        }
        StorageConfig::None => {
            tracing::warn!("storage disabled, quiz data will not be saved");
            Box::new(NoopStorage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZKIT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZKIT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZKIT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_QUIZKIT_UNSET_VAR}/x"), "/x");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZKIT_TEST_VAR");
    }

    #[test]
    fn resolved_values_are_not_rescanned() {
        std::env::set_var("_QUIZKIT_SELF_REF", "${_QUIZKIT_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a/${_QUIZKIT_SELF_REF}/b"),
            "a/${_QUIZKIT_SELF_REF}/b"
        );
        std::env::set_var("_QUIZKIT_CHAIN", "${_QUIZKIT_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_QUIZKIT_CHAIN}-${_QUIZKIT_CHAIN}"),
            "${_QUIZKIT_SELF_REF}-${_QUIZKIT_SELF_REF}"
        );
        std::env::remove_var("_QUIZKIT_SELF_REF");
        std::env::remove_var("_QUIZKIT_CHAIN");
    }

    #[test]
    fn default_config() {
        let config = QuizkitConfig::default();
        assert_eq!(config.user_id, "local");
        assert!(config.catalog_dir.is_none());
        assert_eq!(
            config.storage,
            StorageConfig::File {
                dir: PathBuf::from("./quizkit-data")
            }
        );
    }

    #[test]
    fn parse_storage_config() {
        let toml_str = r#"
user_id = "ada"
catalog_dir = "catalogs"

[storage]
type = "memory"
quota_bytes = 4096
"#;
        let config: QuizkitConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.user_id, "ada");
        assert_eq!(config.catalog_dir, Some(PathBuf::from("catalogs")));
        assert_eq!(
            config.storage,
            StorageConfig::Memory {
                quota_bytes: Some(4096)
            }
        );

        let none: QuizkitConfig = toml::from_str("[storage]\ntype = \"none\"\n").unwrap();
        assert_eq!(none.storage, StorageConfig::None);
        assert_eq!(none.user_id, "local");
    }

    #[test]
    fn data_dir_override_wins() {
        let config = QuizkitConfig {
            storage: StorageConfig::None,
            ..QuizkitConfig::default()
        }
        .resolve(Some("/tmp/quizkit-elsewhere".into()));
        assert_eq!(
            config.storage,
            StorageConfig::File {
                dir: PathBuf::from("/tmp/quizkit-elsewhere")
            }
        );

        let untouched = QuizkitConfig::default().resolve(Some(String::new()));
        assert_eq!(untouched.storage, StorageConfig::default());
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizkit.toml");
        std::fs::write(
            &path,
            "user_id = \"${_QUIZKIT_LOAD_USER}\"\n[storage]\ntype = \"file\"\ndir = \"data\"\n",
        )
        .unwrap();
        std::env::set_var("_QUIZKIT_LOAD_USER", "grace");

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.user_id, "grace");
        std::env::remove_var("_QUIZKIT_LOAD_USER");
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizkit.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizkit.toml");
        std::fs::write(&path, "[storage]\ntype = \"cloud\"\n").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn factory_builds_each_provider() {
        let dir = tempfile::tempdir().unwrap();
        let file = create_storage(&StorageConfig::File {
            dir: dir.path().to_path_buf(),
        });
        assert_eq!(file.name(), "file");
        assert_eq!(
            create_storage(&StorageConfig::Memory { quota_bytes: None }).name(),
            "memory"
        );
        assert_eq!(create_storage(&StorageConfig::None).name(), "none");
    }
}
