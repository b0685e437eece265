use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Переменная окружения с уровнем логирования.
pub const ENV_LOG_LEVEL: &str = "DECKSTATE_LOG_LEVEL";
/// Переменная окружения с форматом логов.
pub const ENV_LOG_FORMAT: &str = "DECKSTATE_LOG_FORMAT";

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Формат строк лога.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Настройки логирования.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub with_target: bool,
    pub with_line_numbers: bool,
    pub ansi: bool,
}

impl LoggingConfig {
    /// Переопределяет уровень и формат из переменных окружения.
    /// Некорректный формат из окружения игнорируется.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var(ENV_LOG_LEVEL) {
            self.level = level.trim().to_lowercase();
        }
        if let Ok(format) = env::var(ENV_LOG_FORMAT) {
            if let Ok(format) = format.parse() {
                self.format = format;
            }
        }
    }

    /// Собирает итоговую конфигурацию: сначала окружение, затем явно
    /// заданные значения (флаги командной строки).
    pub fn layered(
        mut self,
        level: Option<&str>,
        format: Option<LogFormat>,
    ) -> Self {
        self.apply_env_overrides();
        if let Some(level) = level {
            self.level = level.trim().to_lowercase();
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    pub fn validate(&self) -> Result<(), LoggingError> {
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(LoggingError::InvalidLevel(self.level.clone()));
        }
        Ok(())
    }

    /// Директива для `EnvFilter`: зависимости не громче `warn`, наш крейт на
    /// заданном уровне.
    pub fn build_filter_directive(&self) -> String {
        format!("warn,deckstate={level}", level = self.level)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            with_target: true,
            with_line_numbers: false,
            ansi: true,
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = LoggingConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.build_filter_directive(), "warn,deckstate=info");
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let cfg = LoggingConfig {
            level: "loud".into(),
            ..LoggingConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(LoggingError::InvalidLevel("loud".into()))
        );
    }

    /// Тест проверяет, что явный уровень важнее переменной окружения, а
    /// без него используется окружение.
    #[test]
    fn test_explicit_values_override_env() {
        env::set_var(ENV_LOG_LEVEL, "debug");
        let explicit = LoggingConfig::default().layered(Some("ERROR"), Some(LogFormat::Json));
        let from_env = LoggingConfig::default().layered(None, None);
        env::remove_var(ENV_LOG_LEVEL);

        assert_eq!(explicit.level, "error");
        assert_eq!(explicit.format, LogFormat::Json);
        assert_eq!(from_env.level, "debug");
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" pretty ".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }
}
