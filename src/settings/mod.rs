//! Настройки колоды и их упаковка в целое число.
//!
//! - [`flags`] — таблицы имя -> бит и имя -> значение по умолчанию
//! - [`codec`] — упаковка [`Settings`] в битовое поле и обратно

pub mod codec;
pub mod flags;

pub use codec::{decode_flags, encode_flags, encode_named_flags};
pub use flags::{flag_bit, SettingFlags, FLAG_BITS, FLAG_DEFAULTS, SETTINGS_FLAGS_KEY};
use serde::{Deserialize, Serialize};

/// Набор булевых настроек колоды.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub allow_category_editing: bool,
    pub is_randomized: bool,
    pub allow_card_editing: bool,
    pub allow_card_dup: bool,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Settings {
    /// Значение флага по имени из таблицы флагов.
    pub fn get(
        &self,
        name: &str,
    ) -> Option<bool> {
        match name {
            "allowCategoryEditing" => Some(self.allow_category_editing),
            "isRandomized" => Some(self.is_randomized),
            "allowCardEditing" => Some(self.allow_card_editing),
            "allowCardDup" => Some(self.allow_card_dup),
            _ => None,
        }
    }

    /// Устанавливает флаг по имени. Возвращает `false` для неизвестного
    /// имени, ничего не меняя.
    pub fn set(
        &mut self,
        name: &str,
        value: bool,
    ) -> bool {
        let slot = match name {
            "allowCategoryEditing" => &mut self.allow_category_editing,
            "isRandomized" => &mut self.is_randomized,
            "allowCardEditing" => &mut self.allow_card_editing,
            "allowCardDup" => &mut self.allow_card_dup,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Пары (имя, значение) в порядке таблицы битов.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        FLAG_BITS
            .keys()
            .filter_map(move |name| self.get(name).map(|value| (*name, value)))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для Settings
////////////////////////////////////////////////////////////////////////////////

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            allow_category_editing: false,
            is_randomized: false,
            allow_card_editing: false,
            allow_card_dup: false,
        };
        for (name, value) in FLAG_DEFAULTS.entries() {
            settings.set(name, *value);
        }
        settings
    }
}
