use std::str::FromStr;

use thiserror::Error;

use crate::targets::Sink;
use crate::{LogLevel, ParseLevelError};

pub const LEVEL_ENV: &str = "LOGGER_LEVEL";
pub const COLORS_ENV: &str = "LOGGER_COLORS";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only sinks that report a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled_for(self, sink: &dyn Sink) -> bool {
        match self {
            ColorMode::Auto => sink.is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "on" => Ok(ColorMode::Always),
            "never" | "off" => Ok(ColorMode::Never),
            _ => Err(ConfigError::Colors(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("LOGGER_LEVEL: {0}")]
    Level(#[from] ParseLevelError),
    #[error("LOGGER_COLORS: unknown color mode `{0}`")]
    Colors(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub colors: ColorMode,
    pub worker_name: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            level: LogLevel::Info,
            colors: ColorMode::Auto,
            worker_name: "logger-worker".to_string(),
        }
    }
}

impl LoggerConfig {
    /// Reads `LOGGER_LEVEL` and `LOGGER_COLORS`; unset variables keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LoggerConfig::default();
        if let Some(level) = lookup(LEVEL_ENV) {
            config.level = level.parse()?;
        }
        if let Some(colors) = lookup(COLORS_ENV) {
            config.colors = colors.parse()?;
        }
        Ok(config)
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_colors(mut self, colors: ColorMode) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }
}
