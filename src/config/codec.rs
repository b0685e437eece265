use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transcoder::{compression::MAX_COMPRESSION_LEVEL, PaddingPolicy, DEFAULT_COMPRESSION_LEVEL};

/// Префикс переменных окружения.
pub const ENV_PREFIX: &str = "DECKSTATE";

/// Верхняя граница распакованного документа по умолчанию (4 MiB).
pub const DEFAULT_MAX_DECODED_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecConfigError {
    #[error("Compression level {0} is out of range 0..=9")]
    CompressionLevel(u32),

    #[error("max_decoded_bytes must be greater than zero")]
    ZeroSizeLimit,
}

/// Параметры преобразования документа в строку.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub compression_level: u32,
    pub max_decoded_bytes: usize,
    pub padding: PaddingPolicy,
}

impl CodecConfig {
    /// Загружает конфигурацию из переменных окружения `DECKSTATE_*`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_prefix(ENV_PREFIX)
    }

    pub fn load_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            // Добавляем значения по умолчанию
            .set_default("compression_level", DEFAULT_COMPRESSION_LEVEL)?
            .set_default("max_decoded_bytes", DEFAULT_MAX_DECODED_BYTES as u64)?
            .set_default("padding", "keep")?
            // Добавляем переменные окружения с префиксом
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        cfg.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), CodecConfigError> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(CodecConfigError::CompressionLevel(self.compression_level));
        }
        if self.max_decoded_bytes == 0 {
            return Err(CodecConfigError::ZeroSizeLimit);
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            max_decoded_bytes: DEFAULT_MAX_DECODED_BYTES,
            padding: PaddingPolicy::Keep,
        }
    }
}
