//! Документ колоды: категории карточек, карточки без категории и
//! упакованные настройки.
//!
//! В JSON документ — это объект, где зарезервированный ключ `"?"` хранит
//! флаги настроек (целое число), `"#"` — карточки без категории, а все
//! остальные ключи — имена категорий со списками карточек.

mod wire;

use deckstate_error::DocumentError;

use crate::settings::{decode_flags, encode_flags, Settings, SETTINGS_FLAGS_KEY};

/// Ключ записи с карточками без категории.
pub const UNCATEGORIZED_KEY: &str = "#";

/// Ключи, которые не могут быть именами категорий.
pub const RESERVED_KEYS: [&str; 2] = [SETTINGS_FLAGS_KEY, UNCATEGORIZED_KEY];

/// Является ли имя зарезервированным ключом документа.
pub fn is_reserved_key(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Именованная категория с упорядоченным списком карточек.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    cards: Vec<String>,
}

/// Полное сохраняемое состояние колоды.
///
/// Порядок категорий и карточек внутри категории сохраняется.
/// Зарезервированные записи могут отсутствовать в документе, который
/// только что прочитан из строки; [`Document::validate`] проверяет их
/// наличие.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    flags: Option<u64>,
    uncategorized: Option<Vec<String>>,
    categories: Vec<Category>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut Vec<String> {
        &mut self.cards
    }
}

impl Document {
    /// Новый документ: настройки по умолчанию, без карточек и категорий.
    pub fn new() -> Self {
        Self {
            flags: Some(encode_flags(&Settings::default())),
            uncategorized: Some(Vec::new()),
            categories: Vec::new(),
        }
    }

    /// Документ без единой записи (`{}`).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_none() && self.uncategorized.is_none() && self.categories.is_empty()
    }

    /// Упакованные флаги настроек, если запись есть.
    pub fn flags(&self) -> Option<u64> {
        self.flags
    }

    pub fn set_flags(
        &mut self,
        flags: u64,
    ) {
        self.flags = Some(flags);
    }

    /// Настройки, восстановленные из флагов. Отсутствующая запись
    /// читается как `0`.
    pub fn settings(&self) -> Settings {
        decode_flags(self.flags.unwrap_or(0))
    }

    pub fn set_settings(
        &mut self,
        settings: &Settings,
    ) {
        self.flags = Some(encode_flags(settings));
    }

    /// Карточки без категории.
    pub fn uncategorized(&self) -> &[String] {
        self.uncategorized.as_deref().unwrap_or_default()
    }

    pub fn uncategorized_mut(&mut self) -> &mut Vec<String> {
        self.uncategorized.get_or_insert_with(Vec::new)
    }

    pub fn set_uncategorized(
        &mut self,
        cards: Vec<String>,
    ) {
        self.uncategorized = Some(cards);
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(
        &self,
        name: &str,
    ) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.name == name)
    }

    /// Добавляет пустую категорию в конец списка.
    ///
    /// Имя не может быть пустым, зарезервированным или уже занятым.
    pub fn add_category(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut Category, DocumentError> {
        let name = name.into();
        check_category_name(&name)?;
        if self.category(&name).is_some() {
            return Err(DocumentError::DuplicateCategory { name });
        }
        self.categories.push(Category {
            name,
            cards: Vec::new(),
        });
        let last = self.categories.len() - 1;
        Ok(&mut self.categories[last])
    }

    pub fn remove_category(
        &mut self,
        name: &str,
    ) -> Option<Category> {
        let idx = self.categories.iter().position(|c| c.name == name)?;
        Some(self.categories.remove(idx))
    }

    /// Добавляет карточку в категорию (или в список без категории при
    /// `category == None`).
    ///
    /// Если настройка `allowCardDup` выключена и такая карточка уже есть в
    /// этом списке, документ не меняется и возвращается `Ok(false)`.
    pub fn add_card(
        &mut self,
        category: Option<&str>,
        text: impl Into<String>,
    ) -> Result<bool, DocumentError> {
        let allow_dup = self.settings().allow_card_dup;
        let text = text.into();
        let cards = match category {
            None => self.uncategorized_mut(),
            Some(name) => match self.category_mut(name) {
                Some(c) => &mut c.cards,
                None => {
                    return Err(DocumentError::UnknownCategory {
                        name: name.to_string(),
                    })
                }
            },
        };
        if !allow_dup && cards.contains(&text) {
            return Ok(false);
        }
        cards.push(text);
        Ok(true)
    }

    /// Проверяет, что обе зарезервированные записи присутствуют.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.flags.is_none() {
            return Err(DocumentError::MissingReservedKey {
                key: SETTINGS_FLAGS_KEY.to_string(),
            });
        }
        if self.uncategorized.is_none() {
            return Err(DocumentError::MissingReservedKey {
                key: UNCATEGORIZED_KEY.to_string(),
            });
        }
        Ok(())
    }

    /// Вставляет категорию или заменяет карточки существующей.
    /// Имя уже проверено вызывающим кодом.
    fn upsert_category(
        &mut self,
        name: String,
        cards: Vec<String>,
    ) {
        match self.category_mut(&name) {
            Some(existing) => existing.cards = cards,
            None => self.categories.push(Category { name, cards }),
        }
    }
}

fn check_category_name(name: &str) -> Result<(), DocumentError> {
    if name.is_empty() {
        return Err(DocumentError::EmptyCategoryName);
    }
    if is_reserved_key(name) {
        return Err(DocumentError::ReservedKey {
            key: name.to_string(),
        });
    }
    Ok(())
}
