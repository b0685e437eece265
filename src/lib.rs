/// Codec configuration loading (compression level, size limit, padding).
pub mod config;
/// Deck document: categories, uncategorized cards, packed settings.
pub mod document;
/// Logging setup on top of `tracing` (formatting, filters).
pub mod logging;
/// Building a document from page query parameters.
pub mod query;
/// Saving and loading a document as a URL-safe string.
pub mod serializer;
/// Settings record and its bit-field codec.
pub mod settings;
/// Byte <-> text transform: zlib + URL-safe base64.
pub mod transcoder;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Configuration.
pub use config::{CodecConfig, CodecConfigError};
/// Errors.
pub use deckstate_error::{
    CorruptDataError, DocumentError, ErrorExt, LoadResult, LogLevel, StatusCode,
};
/// Document model.
pub use document::{is_reserved_key, Category, Document, RESERVED_KEYS, UNCATEGORIZED_KEY};
/// Query bootstrap.
pub use query::{load_from_query, parse_int_truthy, QueryParameterLoader};
/// Save/load entry points.
pub use serializer::{load_from_string, save_to_string, DocumentSerializer};
/// Settings codec.
pub use settings::{
    decode_flags, encode_flags, encode_named_flags, SettingFlags, Settings, SETTINGS_FLAGS_KEY,
};
/// Transcoder.
pub use transcoder::{PaddingPolicy, TextTranscoder};
