//! Base64, пригодный для вставки в URL.
//!
//! Стандартный алфавит base64, в котором `+` заменён на `-`, а `/` на `_`.
//! Декодирование принимает оба варианта символов и строки как с
//! `=`-дополнением, так и без него.

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig},
        DecodePaddingMode,
    },
    DecodeError, Engine as _,
};
use deckstate_error::CorruptDataError;
use serde::{Deserialize, Serialize};

const PADDED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const UNPADDED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Что делать с `=` в конце закодированной строки.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingPolicy {
    /// Оставлять `=` (как браузерный `FileReader`)
    #[default]
    Keep,
    /// Отбрасывать `=`; при декодировании он восстанавливается
    Strip,
}

/// Кодирует байты в URL-безопасный base64.
pub fn encode_web_safe(
    bytes: &[u8],
    padding: PaddingPolicy,
) -> String {
    let engine = match padding {
        PaddingPolicy::Keep => &PADDED,
        PaddingPolicy::Strip => &UNPADDED,
    };
    engine
        .encode(bytes)
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect()
}

/// Декодирует URL-безопасный base64.
///
/// ASCII-пробелы и переводы строк пропускаются в любом месте строки:
/// ссылка, перенесённая на несколько строк, читается целиком.
pub fn decode_web_safe(text: &str) -> Result<Vec<u8>, CorruptDataError> {
    let standard: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    PADDED.decode(standard.as_bytes()).map_err(map_decode_error)
}

fn map_decode_error(err: DecodeError) -> CorruptDataError {
    match err {
        DecodeError::InvalidByte(offset, byte) => {
            CorruptDataError::invalid_base64(format!("invalid symbol {:?}", byte as char))
                .with_offset(offset)
        }
        DecodeError::InvalidLastSymbol(offset, byte) => {
            CorruptDataError::invalid_base64(format!("invalid last symbol {:?}", byte as char))
                .with_offset(offset)
        }
        DecodeError::InvalidLength(len) => {
            CorruptDataError::invalid_base64(format!("invalid length {len}"))
        }
        DecodeError::InvalidPadding => CorruptDataError::invalid_base64("invalid padding"),
    }
}
