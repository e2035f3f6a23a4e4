//! Configuration for the element searcher.
//!
//! Timing values default to a 500 ms pause before every pass and a 5 s
//! deadline per search. All fields can be overridden from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Timing and bounds of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Pause after the idle wait and before every snapshot
    #[serde(default = "default_poll_pause")]
    pub poll_pause_ms: u64,

    /// Time after which the retry loop stops and makes its final attempt
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Maximum number of scrolls within a single scan
    #[serde(default = "default_max_scrolls")]
    pub max_scrolls_per_scan: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            poll_pause_ms: default_poll_pause(),
            timeout_ms: default_timeout(),
            max_scrolls_per_scan: default_max_scrolls(),
        }
    }
}

// Default value functions for serde
fn default_poll_pause() -> u64 {
    500
}

fn default_timeout() -> u64 {
    5000
}

fn default_max_scrolls() -> usize {
    100
}

impl SearchConfig {
    /// Sets the pause before every pass.
    pub fn with_poll_pause_ms(mut self, poll_pause_ms: u64) -> Self {
        self.poll_pause_ms = poll_pause_ms;
        self
    }

    /// Sets the search deadline.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the scroll bound of a single scan.
    pub fn with_max_scrolls_per_scan(mut self, max_scrolls_per_scan: usize) -> Self {
        self.max_scrolls_per_scan = max_scrolls_per_scan;
        self
    }

    pub fn poll_pause(&self) -> Duration {
        Duration::from_millis(self.poll_pause_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parse configuration from a TOML string. Missing fields take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded search configuration from {:?}", path);
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
