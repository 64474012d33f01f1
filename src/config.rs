//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/knuth/knuth.toml`
//! 3. Local config: `<dir>/.knuth.toml`
//! 4. Environment variables: `KNUTH_*` prefix, `__` as section separator

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{Traversal, DEFAULT_STACK_CAPACITY};

/// Errors raised while loading or rendering settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialize settings: {0}")]
    Serialize(String),
}

/// Stack defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StackConfig {
    /// Capacity used when none is given explicitly
    pub default_capacity: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

/// Tree defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Strategy used by the traversal callbacks
    pub traversal: Traversal,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub stack: RawStackConfig,
    pub tree: RawTreeConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawStackConfig {
    pub default_capacity: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeConfig {
    pub traversal: Option<Traversal>,
}

/// Unified configuration for knuth.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub stack: StackConfig,
    pub tree: TreeConfig,
}

/// Get the XDG config directory for knuth.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "knuth").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("knuth.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".knuth.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn invalid_value(key: &str, message: impl ToString) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.into(),
        message: message.to_string(),
    }
}

/// `NotFound` means the key was not set; every other lookup error is reported.
fn present<V>(key: &str, lookup: Result<V, ConfigError>) -> Result<Option<V>, SettingsError> {
    match lookup {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(invalid_value(key, e)),
    }
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            stack: StackConfig {
                default_capacity: overlay
                    .stack
                    .default_capacity
                    .unwrap_or(self.stack.default_capacity),
            },
            tree: TreeConfig {
                traversal: overlay.tree.traversal.unwrap_or(self.tree.traversal),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.knuth.toml`
    #[instrument(level = "debug")]
    pub fn load(local_dir: Option<&Path>) -> Result<Self, SettingsError> {
        let env = Self::env_overrides()?;
        Self::load_from(global_config_path().as_deref(), local_dir, &env)
    }

    /// Load settings from explicit layers: `global_path` and the local
    /// `.knuth.toml` are read when they exist, `overrides` is applied last.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
        overrides: &Config,
    ) -> Result<Self, SettingsError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Explicit overrides
        Self::apply_overrides(current, overrides)
    }

    /// KNUTH_* environment variables, e.g. `KNUTH_STACK__DEFAULT_CAPACITY`.
    fn env_overrides() -> Result<Config, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("KNUTH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(config)
    }

    /// Overrides replace file values. A key that is absent leaves the value
    /// alone; a key that is present but unusable is an error.
    fn apply_overrides(mut settings: Self, config: &Config) -> Result<Self, SettingsError> {
        const CAPACITY: &str = "stack.default_capacity";
        const TRAVERSAL: &str = "tree.traversal";

        if let Some(val) = present(CAPACITY, config.get_int(CAPACITY))? {
            settings.stack.default_capacity =
                usize::try_from(val).map_err(|e| invalid_value(CAPACITY, e))?;
        }
        if let Some(val) = present(TRAVERSAL, config.get_string(TRAVERSAL))? {
            settings.tree.traversal = val
                .parse()
                .map_err(|message: String| invalid_value(TRAVERSAL, message))?;
        }
        Ok(settings)
    }

    /// Render as TOML, the format of the config files.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }
}
