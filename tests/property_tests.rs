//! Property-based tests для кодека состояния колоды
//!
//! Генерируют тысячи случайных настроек, байтовых последовательностей и
//! документов и проверяют, что преобразования обратимы.

use deckstate::{
    decode_flags, encode_flags, load_from_query, load_from_string, save_to_string, CodecConfig,
    DocumentSerializer, PaddingPolicy, TextTranscoder,
};
use proptest::prelude::*;

use generators::*;

/// Базовая настройка proptest
const PROPTEST_CASES: u32 = 512;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: PROPTEST_CASES,
        .. ProptestConfig::default()
    })]

    /// decode(encode(s)) == s для любых настроек
    #[test]
    fn settings_roundtrip(settings in settings_strategy()) {
        prop_assert_eq!(decode_flags(encode_flags(&settings)), settings);
    }

    /// Неизвестные биты не влияют на известные флаги
    #[test]
    fn settings_decode_ignores_unknown_bits(flags in any::<u64>()) {
        prop_assert_eq!(decode_flags(flags), decode_flags(flags & 0b1111));
        prop_assert_eq!(encode_flags(&decode_flags(flags)), flags & 0b1111);
    }

    /// from_text(to_text(b)) == b, включая пустой ввод
    #[test]
    fn transcoder_roundtrip(
        bytes in prop::collection::vec(any::<u8>(), 0..4096),
        strip in any::<bool>(),
        level in 0u32..=9,
    ) {
        let config = CodecConfig {
            compression_level: level,
            padding: if strip { PaddingPolicy::Strip } else { PaddingPolicy::Keep },
            ..CodecConfig::default()
        };
        let t = TextTranscoder::new(&config);
        let text = t.to_text(&bytes);
        prop_assert!(text.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=')));
        let decoded = t.from_text(&text)
            .map_err(|e| TestCaseError::fail(format!("Failed to decode: {e}")))?;
        prop_assert_eq!(decoded, bytes);
    }

    /// load(save(d)) == d для документов без конфликтов имён
    #[test]
    fn document_roundtrip(doc in document_strategy()) {
        let text = save_to_string(&doc);
        let loaded = load_from_string(&text)
            .map_err(|e| TestCaseError::fail(format!("Failed to load: {e}")))?;
        prop_assert_eq!(loaded, doc);
    }

    /// Строка без `=` читается так же, как строка с `=`
    #[test]
    fn document_roundtrip_without_padding(doc in document_strategy()) {
        let config = CodecConfig { padding: PaddingPolicy::Strip, ..CodecConfig::default() };
        let text = DocumentSerializer::new(&config).save(&doc);
        let loaded = load_from_string(&text)
            .map_err(|e| TestCaseError::fail(format!("Failed to load: {e}")))?;
        prop_assert_eq!(loaded, doc);
    }

    /// Загрузка произвольной строки не паникует
    #[test]
    fn load_arbitrary_text_never_panics(text in any::<String>()) {
        let _ = load_from_string(&text);
    }

    /// Разбор параметров запроса никогда не падает и даёт валидный документ
    #[test]
    fn query_never_fails(query in any::<String>()) {
        let doc = load_from_query(&query);
        prop_assert!(doc.validate().is_ok());
        prop_assert!(doc.flags().unwrap_or(u64::MAX) <= 0b1111);
        prop_assert!(doc.categories().iter().all(|c| c.cards().is_empty()));
    }
}
