//! Configuration types for modelxfer

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the model store root
pub const MODELS_ENV: &str = "OLLAMA_MODELS";

/// Store root relative to the home directory when nothing else is configured
pub const DEFAULT_MODELS_DIR: &str = ".ollama/models";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct XferConfig {
    /// Model store configuration
    pub store: StoreConfig,
    /// Archiving tool configuration
    pub archiver: ArchiverConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl XferConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, crate::XferError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::XferError::Config(format!("Failed to read config file: {}", e))
        })?;
        toml::from_str(&content)
            .map_err(|e| crate::XferError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Model store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the store root holding `manifests/` and `blobs/`
    pub models_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            models_path: expand_home(Path::new("~").join(DEFAULT_MODELS_DIR)),
        }
    }
}

impl StoreConfig {
    /// Pick the store root: an explicit value wins over the configured one.
    pub fn resolve_root(&self, explicit: Option<PathBuf>) -> PathBuf {
        match explicit {
            Some(path) => expand_home(path),
            None => expand_home(self.models_path.clone()),
        }
    }
}

/// Archiving tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiverConfig {
    /// Path to the tar binary
    pub tar_path: PathBuf,
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            tar_path: PathBuf::from("tar"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Expand a leading `~` component to the user's home directory.
///
/// Paths without a leading `~`, or hosts without a home directory, are
/// returned unchanged.
pub fn expand_home(path: PathBuf) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path;
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path,
    }
}
