use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Уровни, допустимые в конфигурации.
const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Ошибки настройки логирования.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Invalid log level '{0}' (expected trace, debug, info, warn, error or off)")]
    InvalidLevel(String),
    #[error("Invalid log format '{0}' (expected compact, pretty or json)")]
    InvalidFormat(String),
    #[error("Failed to install global subscriber: {0}")]
    Init(String),
}

/// Формат вывода событий.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(LoggingError::InvalidFormat(other.to_string())),
        }
    }
}

/// Конфигурация логирования.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Уровень по умолчанию (`info`, `debug`, ...)
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_true")]
    pub with_ansi: bool,
    #[serde(default)]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: false,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), LoggingError> {
        let level = self.level.to_ascii_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(LoggingError::InvalidLevel(self.level.clone()));
        }
        Ok(())
    }

    /// Директива для `EnvFilter`: уровень для крейта и для остальных целей.
    pub fn build_filter_directive(&self) -> String {
        let level = self.level.to_ascii_lowercase();
        format!("nbtree={level},nbtree_cli={level},warn")
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
