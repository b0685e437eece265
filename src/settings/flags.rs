//! Таблицы флагов настроек.
//!
//! Позиции битов — неизменяемый контракт формата: существующий флаг
//! никогда не меняет бит, новый флаг получает следующую свободную
//! степень двойки.

use bitflags::bitflags;
use phf::phf_ordered_map;

/// Ключ записи с упакованными флагами в документе.
pub const SETTINGS_FLAGS_KEY: &str = "?";

bitflags! {
    /// Битовое поле настроек.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SettingFlags: u64 {
        const ALLOW_CATEGORY_EDITING = 1 << 0;
        const IS_RANDOMIZED = 1 << 1;
        const ALLOW_CARD_EDITING = 1 << 2;
        const ALLOW_CARD_DUP = 1 << 3;
    }
}

/// Имя флага -> бит.
pub static FLAG_BITS: phf::OrderedMap<&'static str, SettingFlags> = phf_ordered_map! {
    "allowCategoryEditing" => SettingFlags::ALLOW_CATEGORY_EDITING,
    "isRandomized" => SettingFlags::IS_RANDOMIZED,
    "allowCardEditing" => SettingFlags::ALLOW_CARD_EDITING,
    "allowCardDup" => SettingFlags::ALLOW_CARD_DUP,
};

/// Имя флага -> значение по умолчанию.
pub static FLAG_DEFAULTS: phf::OrderedMap<&'static str, bool> = phf_ordered_map! {
    "allowCardEditing" => false,
    "allowCardDup" => false,
    "allowCategoryEditing" => true,
    "isRandomized" => false,
};

/// Бит для флага с данным именем, `None` для неизвестного имени.
pub fn flag_bit(name: &str) -> Option<SettingFlags> {
    FLAG_BITS.get(name).copied()
}
