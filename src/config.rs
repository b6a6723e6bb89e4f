//! Runtime configuration: built-in defaults, an optional YAML file, then env overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::chart::layout::ContainerSize;
use crate::data::loader::DEFAULT_DATA_PATH;

pub const CONFIG_PATH_ENV: &str = "POPDASH_CONFIG";
pub const BIND_ENV: &str = "POPDASH_BIND";
pub const DATA_PATH_ENV: &str = "POPDASH_DATA";
pub const DEFAULT_CONFIG_FILE: &str = "popdash.yaml";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bind_addr: String,
    pub data_path: PathBuf,
    /// Directory served under `/assets`.
    pub assets_dir: PathBuf,
    /// Container size used until the page reports its own.
    pub container: ContainerSize,
    pub resize_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            assets_dir: PathBuf::from("assets"),
            container: ContainerSize::default(),
            resize_debounce_ms: 150,
        }
    }
}

impl Config {
    /// Resolve the effective configuration for this process.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };
        let mut config = match file {
            Some(path) => Self::from_file(&path)?,
            None => Config::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply env-style overrides through a lookup so tests need not touch the process env.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind_addr = bind;
        }
        if let Some(path) = lookup(DATA_PATH_ENV) {
            self.data_path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_addr.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "bind_addr",
                message: "must not be empty".to_string(),
            });
        }
        if !(self.container.width.is_finite() && self.container.height.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "container",
                message: "width and height must be finite".to_string(),
            });
        }
        Ok(())
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}
