//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::APP_NAME;

/// Environment variable consulted when no API key is stored.
pub const API_KEY_ENV: &str = "WRITEWISE_API_KEY";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Provider HTTP settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Fallbacks for values the user has not saved yet
    #[serde(default)]
    pub defaults: DefaultSettings,

    /// API key taken from the environment, never written to disk
    #[serde(skip)]
    pub env_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Data directory for the preference store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// OpenAI API base URL (empty = https://api.openai.com/v1)
    #[serde(default)]
    pub openai_endpoint: String,

    /// Gemini API base URL (empty = https://generativelanguage.googleapis.com/v1beta)
    #[serde(default)]
    pub gemini_endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSettings {
    #[serde(default = "default_tone")]
    pub tone: String,

    #[serde(default = "default_purpose")]
    pub purpose: String,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", APP_NAME, APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.local/share/writewise"))
}

fn default_timeout_secs() -> u64 {
    45
}

fn default_tone() -> String {
    "neutral".to_string()
}

fn default_purpose() -> String {
    "general".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            openai_endpoint: String::new(),
            gemini_endpoint: String::new(),
        }
    }
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            tone: default_tone(),
            purpose: default_purpose(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let mut settings = Self::load_from(&config_path)?;
        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse a specific settings file without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.env_api_key = Some(key.trim().to_string());
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", APP_NAME, APP_NAME)
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the preference store path
    pub fn database_path(&self) -> PathBuf {
        self.general.data_dir.join("writewise.db")
    }
}
