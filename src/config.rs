//! Configuration loading and management
//!
//! Handles parsing of `.backlog.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional configuration file, looked up in the working
/// directory.
pub const CONFIG_FILE: &str = ".backlog.toml";

/// Directory name used when no platform data directory is available
const FALLBACK_DATA_DIR: &str = ".backlog";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where project data files live. Overridden by `--data-dir` /
    /// `BACKLOG_DATA_DIR`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
}

/// Export-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for default-named export files (default: working directory)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a `.backlog.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the working directory, or return defaults.
    /// A broken config file is logged and ignored rather than blocking
    /// every command.
    pub fn load_or_default() -> Self {
        let path = PathBuf::from(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring bad config");
                Self::default()
            }
        }
    }

    /// Resolve the data directory: CLI/env override, then config file, then
    /// the platform data directory, then `./.backlog`.
    pub fn resolve_data_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        if let Some(dir) = cli_override {
            return dir;
        }
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        if let Some(dirs) = directories::ProjectDirs::from("", "", "backlog") {
            return dirs.data_dir().to_path_buf();
        }
        PathBuf::from(FALLBACK_DATA_DIR)
    }

    /// Directory where default-named exports are written
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn validate(&self) -> crate::error::Result<()> {
        if let Some(dir) = &self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(crate::error::Error::InvalidConfig(
                    "data_dir cannot be empty".to_string(),
                ));
            }
        }
        if let Some(dir) = &self.export.dir {
            if dir.as_os_str().is_empty() {
                return Err(crate::error::Error::InvalidConfig(
                    "export.dir cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
