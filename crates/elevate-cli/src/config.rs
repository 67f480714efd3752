//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use elevate_types::EnvTarget;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "ELEVATE_CONFIG";

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Settings database path
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Environment target seeding new settings
    #[serde(default)]
    pub target: Option<EnvTarget>,

    /// Print JSON instead of tables
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("elevate")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load config from a specific file, or return default if not found
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Resolve the database path: flag or env var, then config, then the
/// platform default.
pub fn resolve_database(db: Option<PathBuf>, config: &Config) -> PathBuf {
    db.or_else(|| config.database.clone())
        .unwrap_or_else(elevate_store::default_db_path)
}

/// Resolve the environment target: flag or env var, then config, then
/// `extension`.
pub fn resolve_target(target: Option<EnvTarget>, config: &Config) -> EnvTarget {
    target.or(config.target).unwrap_or_default()
}
