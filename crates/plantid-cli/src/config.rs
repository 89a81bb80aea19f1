//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use plantid_client::AgentConfig;
use plantid_extractor::ExtractorConfig;
use plantid_store::{HistoryConfig, DEFAULT_CAPACITY, DEFAULT_HISTORY_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".plantid";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "history.db";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Recognition agent connection
    #[serde(default)]
    pub agent: AgentConfig,

    /// History storage
    #[serde(default)]
    pub history: HistorySettings,

    /// Response extraction
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Where and how the history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// SQLite database file; defaults to `~/.plantid/history.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Blob key inside the database
    #[serde(default = "default_history_key")]
    pub key: String,

    /// Retention cap
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from `path` (or the default path), falling back
    /// to defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path()?,
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an existing file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    ///
    /// The agent section is only checked when a recognition is attempted.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("extractor: {}", e)))?;
        self.history.to_history_config().validate()?;
        Ok(())
    }

    /// Database file the history lives in.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.history.database {
            Some(path) => Ok(path.clone()),
            None => Ok(home_dir()?.join(CONFIG_DIR).join(DATABASE_FILE)),
        }
    }
}

impl HistorySettings {
    /// Store-level settings.
    pub fn to_history_config(&self) -> HistoryConfig {
        HistoryConfig {
            key: self.key.clone(),
            capacity: self.capacity,
        }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            database: None,
            key: default_history_key(),
            capacity: default_capacity(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))
}

fn default_history_key() -> String {
    DEFAULT_HISTORY_KEY.to_string()
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
