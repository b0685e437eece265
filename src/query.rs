//! Построение документа из параметров адресной строки.
//!
//! Поддерживаемые параметры (все необязательные):
//!
//! | параметр               | значение                                   |
//! |------------------------|--------------------------------------------|
//! | `cards`                | карточки без категории через запятую       |
//! | `categories`           | имена пустых категорий через запятую       |
//! | `allowCategoryEditing` | `0`/`1`, переопределяет значение по умолч. |
//! | `isRandomized`         | то же                                      |
//! | `allowCardEditing`     | то же                                      |
//! | `allowCardDup`         | то же                                      |
//!
//! Разбор никогда не завершается ошибкой: некорректные значения
//! превращаются в `false` или пропускаются.

use std::collections::HashMap;

use tracing::warn;
use url::{form_urlencoded, Url};

use crate::{
    document::{is_reserved_key, Document},
    settings::{Settings, FLAG_BITS},
};

/// Параметр со списком карточек без категории.
pub const CARDS_PARAM: &str = "cards";

/// Параметр со списком категорий.
pub const CATEGORIES_PARAM: &str = "categories";

/// Строит [`Document`] из параметров запроса без сжатия.
#[derive(Debug, Clone, Default)]
pub struct QueryParameterLoader {
    params: HashMap<String, String>,
}

impl QueryParameterLoader {
    /// Принимает уже декодированные пары. При повторе параметра
    /// используется первое значение.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = HashMap::new();
        for (key, value) in pairs {
            params.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { params }
    }

    /// Разбирает строку запроса в формате
    /// `application/x-www-form-urlencoded`; ведущий `?` допускается.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()).into_owned())
    }

    /// Берёт параметры из полного адреса. Если адрес не разбирается,
    /// возвращается загрузчик без параметров.
    pub fn from_url(url: &str) -> Self {
        match Url::parse(url) {
            Ok(url) => Self::from_pairs(url.query_pairs().into_owned()),
            Err(e) => {
                warn!(error = %e, "Cannot parse URL, using defaults");
                Self::default()
            }
        }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Настройки по умолчанию с переопределениями из параметров.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        for name in FLAG_BITS.keys() {
            if let Some(raw) = self.get(name) {
                let value = parse_int_truthy(raw);
                if value.is_none() {
                    warn!(param = *name, value = raw, "Flag override is not a number");
                }
                settings.set(name, value.unwrap_or(false));
            }
        }
        settings
    }

    /// Собирает документ.
    pub fn load(&self) -> Document {
        let mut doc = Document::empty();
        doc.set_uncategorized(split_list(self.get(CARDS_PARAM)).map(String::from).collect());
        doc.set_settings(&self.settings());

        for name in split_list(self.get(CATEGORIES_PARAM)) {
            if is_reserved_key(name) {
                warn!(category = name, "Skipping reserved category name");
                continue;
            }
            // Повтор имени в списке не создаёт вторую категорию.
            if doc.category(name).is_none() {
                if let Err(e) = doc.add_category(name) {
                    warn!(category = name, error = %e, "Skipping category");
                }
            }
        }
        doc
    }
}

/// Документ из строки запроса.
pub fn load_from_query(query: &str) -> Document {
    QueryParameterLoader::from_query(query).load()
}

/// Список через запятую без пустых элементов.
fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default().split(',').filter(|s| !s.is_empty())
}

/// Разбирает целое так же снисходительно, как `parseInt`, и возвращает
/// его истинность.
///
/// Пробелы в начале пропускаются, допускается знак и префикс `0x`,
/// читается самый длинный префикс из цифр. `None`, если цифр нет.
pub fn parse_int_truthy(raw: &str) -> Option<bool> {
    let s = raw.trim_start();
    let s = s
        .strip_prefix('-')
        .or_else(|| s.strip_prefix('+'))
        .unwrap_or(s);

    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };

    let mut seen = false;
    let mut nonzero = false;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => {
                seen = true;
                nonzero |= d != 0;
            }
            None => break,
        }
    }
    seen.then_some(nonzero)
}
