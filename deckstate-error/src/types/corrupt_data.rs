use std::any::Any;

use crate::{ErrorExt, StatusCode};

/// Строка состояния не может быть восстановлена в документ.
///
/// Единственный вид ошибки для `from_text` и `load`: загрузка либо
/// возвращает документ целиком, либо одну из этих ошибок.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorruptDataError {
    /// Текст не является base64 (после обратной замены `-`/`_`)
    InvalidBase64 {
        reason: String,
        offset: Option<usize>,
    },

    /// Поток deflate повреждён или обрезан
    Decompression { reason: String },

    /// Распакованные данные превысили допустимый размер
    SizeLimit { size: usize, limit: usize },

    /// Распакованные байты не являются UTF-8
    InvalidUtf8 {
        reason: String,
        offset: Option<usize>,
    },

    /// Текст не разбирается как документ
    Malformed {
        reason: String,
        line: usize,
        column: usize,
    },
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl CorruptDataError {
    pub fn invalid_base64(reason: impl Into<String>) -> Self {
        Self::InvalidBase64 {
            reason: reason.into(),
            offset: None,
        }
    }

    pub fn decompression(reason: impl Into<String>) -> Self {
        Self::Decompression {
            reason: reason.into(),
        }
    }

    /// Добавляет контекст offset к ошибке.
    pub fn with_offset(
        mut self,
        offset: usize,
    ) -> Self {
        match &mut self {
            Self::InvalidBase64 { offset: o, .. } | Self::InvalidUtf8 { offset: o, .. } => {
                *o = Some(offset);
            }
            _ => {}
        }
        self
    }

    /// Подсказка для пользователя.
    pub fn recovery_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidBase64 { .. } => {
                Some("The link may have been cut or edited. Copy the full link again")
            }
            Self::Decompression { .. } => Some("The saved state is truncated. Copy the full link"),
            Self::SizeLimit { .. } => Some("Raise max_decoded_bytes if this state is trusted"),
            Self::InvalidUtf8 { .. } | Self::Malformed { .. } => None,
        }
    }
}

impl std::fmt::Display for CorruptDataError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::InvalidBase64 { reason, offset } => {
                write!(f, "Invalid base64: {reason}")?;
                write_offset(f, *offset)
            }
            Self::Decompression { reason } => write!(f, "Decompression failed: {reason}"),
            Self::SizeLimit { size, limit } => {
                write!(f, "Decoded size {size} exceeds limit {limit} bytes")
            }
            Self::InvalidUtf8 { reason, offset } => {
                write!(f, "Invalid UTF-8: {reason}")?;
                write_offset(f, *offset)
            }
            Self::Malformed {
                reason,
                line,
                column,
            } => write!(
                f,
                "Malformed document: {reason} (line {line}, column {column})"
            ),
        }
    }
}

fn write_offset(
    f: &mut std::fmt::Formatter<'_>,
    offset: Option<usize>,
) -> std::fmt::Result {
    if let Some(o) = offset {
        write!(f, " [offset: {o}]")?;
    }
    Ok(())
}

impl std::error::Error for CorruptDataError {}

impl ErrorExt for CorruptDataError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBase64 { .. } => StatusCode::DecodingError,
            Self::Decompression { .. } => StatusCode::CompressionFailed,
            Self::SizeLimit { .. } => StatusCode::SizeLimit,
            Self::InvalidUtf8 { .. } => StatusCode::InvalidUtf8,
            Self::Malformed { .. } => StatusCode::ParseError,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn client_message(&self) -> String {
        "The saved state could not be restored".to_string()
    }

    fn log_message(&self) -> String {
        let mut msg = format!("{self:?}");
        if let Some(hint) = self.recovery_hint() {
            msg.push_str(&format!(" | Hint: {hint}"));
        }
        msg
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
