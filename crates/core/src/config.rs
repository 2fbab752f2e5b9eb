//! nin configuration
//!
//! Loaded from a YAML file, with environment overrides for the file location
//! and the store path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "NIN_CONFIG";

/// Environment variable overriding the store path
pub const STORE_ENV: &str = "NIN_STORE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// nin main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NinConfig {
    /// Store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Listing options
    #[serde(default)]
    pub list: ListConfig,

    /// Integrated client (disabled when absent)
    pub integration: Option<IntegrationConfig>,

    /// Tracing filter, e.g. "debug" or "nin_core=trace"
    pub log_level: Option<String>,
}

/// Store file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    #[default]
    Toml,
    Json,
}

impl StoreFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            StoreFormat::Toml => "toml",
            StoreFormat::Json => "json",
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store file path
    pub path: Option<PathBuf>,

    /// File format
    #[serde(default)]
    pub format: StoreFormat,
}

impl StoreConfig {
    /// Configured path, or `~/.nin/todos.<ext>`
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| default_data_dir().join(format!("todos.{}", self.format.extension())))
    }
}

/// Listing options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Include archived items
    #[serde(default)]
    pub archived: bool,
}

/// Local integrated client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// JSON export the client reads items from
    pub import_path: PathBuf,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".nin"))
        .unwrap_or_else(|| PathBuf::from(".nin"))
}

/// `<config dir>/nin/config.yaml`, e.g. `~/.config/nin/config.yaml` on Linux
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("nin").join("config.yaml"))
        .unwrap_or_else(|| PathBuf::from(".nin").join("config.yaml"))
}

impl NinConfig {
    /// Parse a YAML document
    pub fn from_yaml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`; a missing file yields the default config
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(path, &content)
    }

    /// Resolve the config file (explicit path, `NIN_CONFIG`, default) and load it,
    /// then apply the `NIN_STORE` override
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().filter(|v| !v.is_empty()).map(PathBuf::from));

        let path = match requested {
            Some(path) => {
                if !path.exists() {
                    warn!("Config file {} not found, falling back to defaults", path.display());
                }
                path
            }
            None => default_config_path(),
        };

        let mut config = Self::load_from(&path)?;
        if let Ok(store) = std::env::var(STORE_ENV) {
            if !store.is_empty() {
                config.store.path = Some(PathBuf::from(store));
            }
        }
        Ok(config)
    }
}
