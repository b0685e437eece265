//! Упаковка настроек в целое число и обратно.

use super::{flag_bit, Settings, SettingFlags, FLAG_BITS};

/// Восстанавливает настройки из битового поля.
///
/// Начинает со значений по умолчанию и затем перезаписывает каждый флаг
/// из таблицы битов, поэтому `0` даёт все известные флаги `false`.
/// Неизвестные биты игнорируются.
pub fn decode_flags(flags: u64) -> Settings {
    let bits = SettingFlags::from_bits_truncate(flags);
    let mut settings = Settings::default();
    for (name, bit) in FLAG_BITS.entries() {
        settings.set(name, bits.contains(*bit));
    }
    settings
}

/// Упаковывает настройки в битовое поле.
pub fn encode_flags(settings: &Settings) -> u64 {
    encode_named_flags(settings.iter())
}

/// Упаковывает произвольные пары (имя, значение).
///
/// Имена, которых нет в таблице битов, пропускаются.
pub fn encode_named_flags<I, K>(pairs: I) -> u64
where
    I: IntoIterator<Item = (K, bool)>,
    K: AsRef<str>,
{
    pairs
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .filter_map(|(name, _)| flag_bit(name.as_ref()))
        .fold(SettingFlags::empty(), |acc, bit| acc | bit)
        .bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_defaults_is_one() {
        assert_eq!(encode_flags(&Settings::default()), 1);
    }

    /// Тест проверяет, что после декодирования ни один флаг не остаётся
    /// со значением по умолчанию.
    #[test]
    fn test_decode_zero_clears_defaults() {
        let s = decode_flags(0);
        assert!(s.iter().all(|(_, v)| !v));
    }

    #[test]
    fn test_decode_all_bits() {
        let s = decode_flags(15);
        assert!(s.iter().all(|(_, v)| v));
    }

    /// Тест проверяет, что неизвестные биты не влияют на результат.
    #[test]
    fn test_decode_ignores_unknown_bits() {
        assert_eq!(decode_flags(16), decode_flags(0));
        assert_eq!(decode_flags(16 | 2), decode_flags(2));
        assert_eq!(decode_flags(u64::MAX), decode_flags(15));
    }

    #[test]
    fn test_decode_single_bits() {
        assert!(decode_flags(2).is_randomized);
        assert!(decode_flags(4).allow_card_editing);
        assert!(decode_flags(8).allow_card_dup);
        assert!(!decode_flags(8).allow_category_editing);
    }

    #[test]
    fn test_encode_named_ignores_unknown_names() {
        let flags = encode_named_flags([
            ("isRandomized", true),
            ("darkMode", true),
            ("allowCardDup", false),
        ]);
        assert_eq!(flags, 2);

        let owned = vec![("allowCardDup".to_string(), true)];
        assert_eq!(encode_named_flags(owned), 8);
    }

    #[test]
    fn test_roundtrip_every_combination() {
        for flags in 0..16u64 {
            let s = decode_flags(flags);
            assert_eq!(encode_flags(&s), flags);
            assert_eq!(decode_flags(encode_flags(&s)), s);
        }
    }
}
