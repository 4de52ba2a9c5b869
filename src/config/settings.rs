use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{
    logging::{LogFormat, LoggingConfig},
    nbt::{CompressionMode, DecodeOptions, DEFAULT_MAX_DEPTH},
};

/// Настройки приложения.
///
/// Источники по возрастанию приоритета: значения по умолчанию, файл
/// `nbtree.toml` (необязательный), переменные окружения `NBTREE_*`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Лимит вложенности контейнеров при чтении и записи
    pub max_depth: usize,
    /// Сжатие для новых документов
    pub compression: CompressionMode,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            compression: CompressionMode::Uncompressed,
            log_level: "info".to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

impl Settings {
    /// Загружает настройки из `nbtree.toml` в текущем каталоге (если есть) и
    /// окружения.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Загружает настройки; `path` задаёт обязательный файл конфигурации.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("max_depth", DEFAULT_MAX_DEPTH as u64)?
            .set_default("compression", "uncompressed")?
            .set_default("log_level", "info")?
            .set_default("log_format", "compact")?;

        builder = match path {
            Some(p) => builder.add_source(File::from(p).required(true)),
            None => builder.add_source(File::with_name("nbtree").required(false)),
        };

        let cfg = builder
            .add_source(Environment::with_prefix("NBTREE").try_parsing(true))
            .build()?;

        let settings: Settings = cfg.try_deserialize()?;
        if settings.max_depth == 0 {
            return Err(ConfigError::Message(
                "max_depth must be greater than zero".to_string(),
            ));
        }
        Ok(settings)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            max_depth: self.max_depth,
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
            ..LoggingConfig::default()
        }
    }
}
