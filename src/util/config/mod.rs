//! Zhuque configuration system
//!
//! Project-level configuration with defaults-on-missing semantics.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high -> low):
//! 1. CLI arguments
//! 2. Project-level (zhuque.toml)
//! 3. Default values
//! ```
//!
//! # Usage
//!
//! ```rust
//! use zhuque::util::config::EngineConfig;
//!
//! // Load project config (defaults if zhuque.toml does not exist)
//! let config = EngineConfig::load().unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default project config file name
pub const CONFIG_FILE: &str = "zhuque.toml";

/// Engine configuration for Zhuque
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
    /// REPL settings
    #[serde(default)]
    pub repl: ReplConfig,
    /// Parse-time limits
    #[serde(default)]
    pub limits: LimitConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// REPL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Whether to persist line history
    #[serde(default = "default_true")]
    pub history: bool,
    /// History file path (defaults to `.zhuque_history`)
    #[serde(default)]
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history: true,
            history_file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Parse-time limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Maximum nested block depth accepted by the reader
    #[serde(default = "default_block_depth")]
    pub max_block_depth: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_block_depth: default_block_depth(),
        }
    }
}

fn default_block_depth() -> usize {
    64
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EngineConfig {
    /// Load project config from `zhuque.toml` in the working directory.
    ///
    /// Returns defaults when the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load config from an explicit path, defaults when missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
