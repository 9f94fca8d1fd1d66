//! Configuration management for subfetch
//!
//! Handles config file loading/saving and login settings.
//! Config is stored at ~/.config/subfetch/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::rpc::request::LoginRequest;

/// User agent registered with the subtitle service
pub const DEFAULT_USER_AGENT: &str = "libsubtle";

/// Subtitle language searched when none is given
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Environment variable overriding the user agent
pub const USER_AGENT_ENV: &str = "SUBFETCH_USER_AGENT";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// User agent sent at login
    pub user_agent: Option<String>,
    /// Default subtitle search language (3-letter id, e.g. "eng")
    pub language: Option<String>,
    /// Interface language for the session (ISO 639-1)
    pub interface_language: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/subfetch/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subfetch").join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path; a missing or invalid file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// User agent with fallback chain:
    /// 1. Environment variable SUBFETCH_USER_AGENT
    /// 2. Value from config file
    /// 3. Built-in default
    pub fn user_agent(&self) -> String {
        if let Ok(agent) = std::env::var(USER_AGENT_ENV) {
            if !agent.trim().is_empty() {
                return agent;
            }
        }

        self.user_agent
            .clone()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }

    /// Subtitle search language
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Login request built from the stored credentials; anonymous when unset
    pub fn login_request(&self) -> LoginRequest {
        LoginRequest::new(
            self.username.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
            self.interface_language.clone().unwrap_or_default(),
        )
    }
}
