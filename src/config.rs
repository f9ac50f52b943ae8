//! Persisted per-repository configuration.
//!
//! The record is read fresh on every call and rewritten whole on save.
//! `load` never fails: it is the single place where load errors are turned
//! into defaults.

use crate::constants::{DEFAULT_BRANCH, DEFAULT_REMOTE, GITHUB_HOST};
use crate::paths::write_private_atomic;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Settings remembered across invocations.
///
/// Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "null_as_empty")]
    pub branch: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub remote: String,
    /// Empty means "use the process current directory".
    #[serde(deserialize_with = "null_as_empty")]
    pub workdir: String,
    /// GitHub user or organisation.
    #[serde(deserialize_with = "null_as_empty")]
    pub owner: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub repo: String,
}

/// Reads a JSON `null` as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            workdir: String::new(),
            owner: String::new(),
            repo: String::new(),
        }
    }
}

impl Config {
    /// Replaces empty branch/remote with their defaults.
    fn with_defaults(mut self) -> Self {
        if self.branch.is_empty() {
            self.branch = DEFAULT_BRANCH.to_string();
        }
        if self.remote.is_empty() {
            self.remote = DEFAULT_REMOTE.to_string();
        }
        self
    }

    /// The configured working directory, if any.
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        if self.workdir.is_empty() {
            None
        } else {
            Some(Path::new(&self.workdir))
        }
    }

    /// The configured working directory, falling back to `cwd`.
    #[must_use]
    pub fn resolve_workdir(&self, cwd: &Path) -> PathBuf {
        self.workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf())
    }

    /// Public repository URL, when both owner and repository are known.
    #[must_use]
    pub fn repo_url(&self) -> Option<String> {
        if self.owner.is_empty() || self.repo.is_empty() {
            return None;
        }
        Some(format!("https://{}/{}/{}", GITHUB_HOST, self.owner, self.repo))
    }
}

/// JSON-file backed store for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored configuration, reporting why it could not be used.
    pub fn try_load(&self) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;

        Ok(config.with_defaults())
    }

    /// Reads the stored configuration, falling back to defaults on any error.
    pub fn load(&self) -> Config {
        match self.try_load() {
            Ok(config) => config,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Config::default()
            }
            Err(e) => {
                debug!(error = %e, "using default configuration");
                Config::default()
            }
        }
    }

    pub fn try_save(&self, config: &Config) -> Result<(), ConfigError> {
        let mut content = serde_json::to_string_pretty(config)?;
        content.push('\n');
        write_private_atomic(&self.path, content.as_bytes()).map_err(|source| {
            ConfigError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Best-effort save; failures are logged and otherwise ignored.
    pub fn save(&self, config: &Config) {
        if let Err(e) = self.try_save(config) {
            warn!(error = %e, "configuration not saved");
        }
    }

    /// Loads, applies `change`, and saves the result.
    pub fn update<F>(&self, change: F) -> Config
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load();
        change(&mut config);
        self.save(&config);
        config
    }
}
