//! Game configuration loaded from TOML.

use crate::games::niya::Layout;
use crate::session::ControlMode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for a game session.
///
/// ```toml
/// red = "strong"
/// black = "human"
/// layout = "0 4 8 12 1 5 9 13 2 6 10 14 3 7 11 15"
/// seed = 7
/// log_filter = "strictly_niya=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct NiyaConfig {
    /// Control mode for Red, who moves first.
    #[serde(default = "default_red")]
    red: ControlMode,

    /// Control mode for Black.
    #[serde(default = "default_black")]
    black: ControlMode,

    /// Tile identities or `plant:poem` pairs in board order.
    #[serde(default)]
    layout: Option<String>,

    /// Seed for random layouts and casual moves.
    #[serde(default)]
    seed: Option<u64>,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_red() -> ControlMode {
    ControlMode::Strong
}

fn default_black() -> ControlMode {
    ControlMode::Human
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for NiyaConfig {
    fn default() -> Self {
        Self {
            red: default_red(),
            black: default_black(),
            layout: None,
            seed: None,
            log_filter: default_log_filter(),
        }
    }
}

impl NiyaConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(red = %config.red, black = %config.black, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Overrides the control modes.
    pub fn with_modes(mut self, red: Option<ControlMode>, black: Option<ControlMode>) -> Self {
        if let Some(red) = red {
            self.red = red;
        }
        if let Some(black) = black {
            self.black = black;
        }
        self
    }

    /// Overrides the layout text.
    pub fn with_layout(mut self, layout: Option<String>) -> Self {
        if layout.is_some() {
            self.layout = layout;
        }
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Parses the configured layout, if any.
    pub fn parsed_layout(&self) -> Result<Option<Layout>, ConfigError> {
        self.layout
            .as_deref()
            .map(|text| {
                Layout::parse(text).map_err(|e| ConfigError::new(format!("Invalid layout: {}", e)))
            })
            .transpose()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
