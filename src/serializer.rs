//! Сохранение документа в строку и загрузка из строки.
//!
//! ```text
//! save: Document -> JSON -> UTF-8 -> TextTranscoder::to_text
//! load: TextTranscoder::from_text -> UTF-8 -> JSON -> Document
//! ```
//!
//! Загрузка проверяет только синтаксис и типы значений. Наличие
//! зарезервированных записей проверяет вызывающий код через
//! [`Document::validate`].

use deckstate_error::{CorruptDataError, LoadResult};
use tracing::{debug, warn};

use crate::{config::CodecConfig, document::Document, transcoder::TextTranscoder};

#[derive(Debug, Clone, Default)]
pub struct DocumentSerializer {
    transcoder: TextTranscoder,
}

impl DocumentSerializer {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            transcoder: TextTranscoder::new(config),
        }
    }

    pub fn with_transcoder(transcoder: TextTranscoder) -> Self {
        Self { transcoder }
    }

    /// Сохраняет документ в URL-безопасную строку.
    pub fn save(
        &self,
        document: &Document,
    ) -> String {
        let json = serde_json::to_vec(document).expect("Document serialization failed");
        debug!(
            categories = document.categories().len(),
            json = json.len(),
            "Saving document"
        );
        self.transcoder.to_text(&json)
    }

    /// Восстанавливает документ из строки, полученной из [`save`](Self::save).
    pub fn load(
        &self,
        text: &str,
    ) -> LoadResult<Document> {
        let result = self.transcoder.from_text(text).and_then(|bytes| parse_document(&bytes));
        if let Err(err) = &result {
            warn!(error = %err, len = text.len(), "Failed to load document");
        }
        result
    }
}

/// Разбирает JSON-представление документа.
pub fn parse_document(bytes: &[u8]) -> LoadResult<Document> {
    let json = std::str::from_utf8(bytes).map_err(|e| CorruptDataError::InvalidUtf8 {
        reason: e.to_string(),
        offset: Some(e.valid_up_to()),
    })?;

    serde_json::from_str(json).map_err(|e| CorruptDataError::Malformed {
        reason: e.to_string(),
        line: e.line(),
        column: e.column(),
    })
}

/// Сохраняет документ с конфигурацией по умолчанию.
pub fn save_to_string(document: &Document) -> String {
    DocumentSerializer::default().save(document)
}

/// Загружает документ с конфигурацией по умолчанию.
pub fn load_from_string(text: &str) -> LoadResult<Document> {
    DocumentSerializer::default().load(text)
}
