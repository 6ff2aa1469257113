//! Configuration for the usc driver.
//!
//! Settings come from a `usc.toml` file. Command-line flags are applied on
//! top by the binary.

use dirs::{config_dir, home_dir};
use num_cpus::get as get_num_cpus;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use usc_lex::PositionMode;

use crate::error::{DriverError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "usc.toml";

/// Fallback worker count when the CPU count does not fit.
const DEFAULT_THREAD_COUNT: u32 = 4;

/// Driver configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Lexer settings.
    #[serde(default)]
    pub lexer: LexerConfig,

    /// Token dump settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Scheduling settings.
    #[serde(default)]
    pub driver: DriverConfig,
}

/// `[lexer]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LexerConfig {
    /// How token positions are tracked.
    #[serde(default)]
    pub position_mode: PositionSetting,
}

/// `[output]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Format of the token dump.
    #[serde(default)]
    pub format: OutputFormat,
}

/// `[driver]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverConfig {
    /// Number of files lexed in parallel.
    #[serde(default = "default_parallel_jobs")]
    pub jobs: u32,
}

/// Serialized form of [`PositionMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionSetting {
    /// Every byte advances the column; the line stays 1.
    #[default]
    ColumnOnly,
    /// Line feeds start a new line.
    LineColumn,
}

impl From<PositionSetting> for PositionMode {
    fn from(setting: PositionSetting) -> Self {
        match setting {
            PositionSetting::ColumnOnly => PositionMode::ColumnOnly,
            PositionSetting::LineColumn => PositionMode::LineColumn,
        }
    }
}

/// Token dump format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `file:line:column kind value` line per token.
    #[default]
    Text,
    /// A single JSON array of token objects.
    Json,
}

/// Get the default number of parallel jobs based on CPU count.
fn default_parallel_jobs() -> u32 {
    get_num_cpus().try_into().unwrap_or(DEFAULT_THREAD_COUNT)
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            jobs: default_parallel_jobs(),
        }
    }
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// Searches, in order:
    /// 1. `usc.toml` in the current directory
    /// 2. `~/.config/usc/usc.toml`
    /// 3. `usc/usc.toml` under the platform configuration directory
    ///
    /// Returns the default configuration if no file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DriverError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| DriverError::Config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;

        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Rejects values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.driver.jobs == 0 {
            return Err(DriverError::Config(
                "driver.jobs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("usc").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("usc").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
