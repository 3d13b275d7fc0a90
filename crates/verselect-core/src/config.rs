use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::status::StatusScheme;

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "verselect.toml";

/// Engine configuration loaded from `verselect.toml` or `~/.verselect/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub status: StatusConfig,

    #[serde(default)]
    pub ranker: RankerConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Status scheme from `[status]`, least mature status first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    #[serde(default = "default_scheme")]
    pub scheme: Vec<String>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
        }
    }
}

fn default_scheme() -> Vec<String> {
    StatusScheme::default().statuses().to_vec()
}

/// Candidate ranking settings from `[ranker]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Trust that candidate lists already arrive newest first.
    #[serde(default, rename = "assume-sorted")]
    pub assume_sorted: bool,
}

/// Parsed-version memoization settings from `[cache]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Upper bound on memoized versions; `0` disables the cache.
    #[serde(default = "default_max_entries", rename = "max-entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> usize {
    4096
}

impl EngineConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> miette::Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            verselect_util::errors::VerselectError::Config {
                message: format!("Failed to parse configuration: {e}"),
            }
        })?;
        config.status_scheme()?;
        Ok(config)
    }

    /// Load configuration from an explicit file.
    pub fn load(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            verselect_util::errors::VerselectError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        tracing::debug!("Loading engine configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Load `./verselect.toml`, then `~/.verselect/config.toml`, falling back
    /// to defaults when neither exists.
    pub fn discover() -> miette::Result<Self> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load(&local);
        }
        let global = Self::default_path();
        if global.is_file() {
            return Self::load(&global);
        }
        Ok(Self::default())
    }

    /// The configured status scheme, validated.
    pub fn status_scheme(&self) -> miette::Result<StatusScheme> {
        StatusScheme::new(self.status.scheme.iter().cloned())
    }

    /// Returns the default path to the user configuration file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the verselect data directory (`~/.verselect/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".verselect")
}
