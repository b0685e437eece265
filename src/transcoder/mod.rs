//! Преобразование байтов в компактную URL-безопасную строку и обратно.
//!
//! ```text
//! bytes -> zlib -> base64 -> (+ -> -, / -> _) -> text
//! ```
//!
//! - [`compression`] — сжатие и распаковка zlib
//! - [`web_base64`] — base64 с заменой символов для URL
//!
//! Модуль ничего не знает о JSON и подходит для любой полезной нагрузки.

pub mod compression;
pub mod web_base64;

pub use compression::{compress_block, decompress_block, DEFAULT_COMPRESSION_LEVEL};
use deckstate_error::LoadResult;
use tracing::debug;
pub use web_base64::{decode_web_safe, encode_web_safe, PaddingPolicy};

use crate::config::CodecConfig;

/// Обратимое преобразование байтов в текст.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTranscoder {
    compression_level: u32,
    max_decoded_bytes: usize,
    padding: PaddingPolicy,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl TextTranscoder {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            compression_level: config.compression_level,
            max_decoded_bytes: config.max_decoded_bytes,
            padding: config.padding,
        }
    }

    /// Сжимает байты и кодирует их в URL-безопасный base64.
    pub fn to_text(
        &self,
        bytes: &[u8],
    ) -> String {
        let compressed = compress_block(bytes, self.compression_level);
        let text = encode_web_safe(&compressed, self.padding);
        debug!(
            raw = bytes.len(),
            compressed = compressed.len(),
            text = text.len(),
            "Encoded payload"
        );
        text
    }

    /// Декодирует строку, полученную из [`TextTranscoder::to_text`].
    ///
    /// Возвращает `CorruptDataError`, если строка не является base64 или
    /// поток zlib повреждён, обрезан либо слишком велик.
    pub fn from_text(
        &self,
        text: &str,
    ) -> LoadResult<Vec<u8>> {
        let compressed = decode_web_safe(text)?;
        let bytes = decompress_block(&compressed, self.max_decoded_bytes)?;
        debug!(
            text = text.len(),
            compressed = compressed.len(),
            raw = bytes.len(),
            "Decoded payload"
        );
        Ok(bytes)
    }

    pub fn padding(&self) -> PaddingPolicy {
        self.padding
    }
}

impl Default for TextTranscoder {
    fn default() -> Self {
        Self::new(&CodecConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use deckstate_error::CorruptDataError;

    use super::*;

    #[test]
    fn test_roundtrip_text() {
        let t = TextTranscoder::default();
        let payload = "Привет, flashcards! ".repeat(20);
        let text = t.to_text(payload.as_bytes());
        assert!(text.len() < payload.len());
        assert_eq!(t.from_text(&text).unwrap(), payload.as_bytes());
    }

    #[test]
    fn test_roundtrip_empty() {
        let t = TextTranscoder::default();
        let text = t.to_text(b"");
        assert!(!text.is_empty());
        assert!(t.from_text(&text).unwrap().is_empty());
    }

    /// Тест проверяет, что результат не содержит символов, требующих
    /// экранирования в URL.
    #[test]
    fn test_output_is_url_safe() {
        let t = TextTranscoder::default();
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let text = t.to_text(&bytes);
        assert!(text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=')));
    }

    #[test]
    fn test_strip_padding_roundtrip() {
        let config = CodecConfig {
            padding: PaddingPolicy::Strip,
            ..CodecConfig::default()
        };
        let t = TextTranscoder::new(&config);
        for len in 0..8 {
            let bytes = vec![b'a'; len];
            let text = t.to_text(&bytes);
            assert!(!text.contains('='));
            assert_eq!(t.from_text(&text).unwrap(), bytes);
            // строка без `=` читается и транскодером с `Keep`
            assert_eq!(TextTranscoder::default().from_text(&text).unwrap(), bytes);
        }
    }

    #[test]
    fn test_from_text_rejects_garbage() {
        let t = TextTranscoder::default();
        assert!(matches!(
            t.from_text("not-valid-base64!!"),
            Err(CorruptDataError::InvalidBase64 { .. })
        ));
        // корректный base64, но не zlib
        assert!(matches!(
            t.from_text("aGVsbG8gd29ybGQ="),
            Err(CorruptDataError::Decompression { .. })
        ));
    }

    #[test]
    fn test_from_text_respects_size_limit() {
        let config = CodecConfig {
            max_decoded_bytes: 16,
            ..CodecConfig::default()
        };
        let t = TextTranscoder::new(&config);
        let text = t.to_text(&[0u8; 64]);
        assert!(matches!(
            t.from_text(&text),
            Err(CorruptDataError::SizeLimit { limit: 16, .. })
        ));
    }
}
