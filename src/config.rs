//! Engine configuration persisted as TOML under the app root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the engine configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that may occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Settings used to build a [`crate::engine::MotionEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Trained knee-in model JSON; without one the engine only uses heuristics.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    /// Seed for reproducible heuristic scenario selection.
    #[serde(default)]
    pub heuristic_seed: Option<u64>,
    /// Exercise label used when the caller supplies none.
    #[serde(default = "default_exercise")]
    pub default_exercise: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            heuristic_seed: None,
            default_exercise: default_exercise(),
        }
    }
}

impl EngineConfig {
    /// Resolve relative model paths against the directory holding the config file.
    fn resolved_against(mut self, config_dir: Option<&Path>) -> Self {
        if let (Some(model_path), Some(dir)) = (self.model_path.as_ref(), config_dir)
            && model_path.is_relative()
        {
            self.model_path = Some(dir.join(model_path));
        }
        if self.default_exercise.trim().is_empty() {
            self.default_exercise = default_exercise();
        }
        self
    }
}

fn default_exercise() -> String {
    "squat".to_string()
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from the app root, returning defaults if missing.
pub fn load_or_default() -> Result<EngineConfig, ConfigError> {
    load_from_path(&config_path()?)
}

/// Load configuration from `path`, returning defaults if the file does not exist.
pub fn load_from_path(path: &Path) -> Result<EngineConfig, ConfigError> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: EngineConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.resolved_against(path.parent()))
}

/// Save configuration to the app root.
pub fn save(config: &EngineConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to `path`, creating parent directories as needed.
pub fn save_to_path(config: &EngineConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
