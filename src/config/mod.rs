//! Configuration storage

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://20.193.145.154/api";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_COMPANY: &str = "huru";
const DEFAULT_HISTORY_LIMIT: usize = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Application configuration.
///
/// Every key is optional in the file; anything missing falls back to the
/// built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Calling backend base URL (no trailing slash needed)
    pub base_url: String,
    /// HTTP Basic username
    pub username: String,
    /// HTTP Basic password
    pub password: String,
    /// Company tag sent with every start_call request
    pub company: String,
    /// Number of rows requested for the recent calls table
    pub history_limit: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: String::new(),
            company: DEFAULT_COMPANY.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "huru", "huru-dialer")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from disk, or defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_toml(&content)
    }

    /// Parse configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Password rendered for display: never the real value.
    pub fn masked_password(&self) -> &'static str {
        if self.password.is_empty() {
            "(not set)"
        } else {
            "********"
        }
    }

    /// Startup warning when no password is configured, since the backend
    /// rejects every request without one.
    pub fn credentials_warning(&self) -> Option<String> {
        if !self.password.is_empty() {
            return None;
        }
        let location = Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "config.toml".to_string());
        Some(format!(
            "No password configured; requests will fail with 401. Set `password` in {}",
            location
        ))
    }
}
