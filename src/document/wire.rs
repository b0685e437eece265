//! JSON-представление документа.
//!
//! Сериализуется как один объект: `"?"` -> целое, `"#"` -> массив строк,
//! имя категории -> массив строк. Повторяющиеся ключи при чтении
//! перезаписывают предыдущее значение, как в `JSON.parse`.

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use super::{Document, UNCATEGORIZED_KEY};
use crate::settings::SETTINGS_FLAGS_KEY;

impl Serialize for Document {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.flags.is_some() as usize
            + self.uncategorized.is_some() as usize
            + self.categories.len();
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(flags) = self.flags {
            map.serialize_entry(SETTINGS_FLAGS_KEY, &flags)?;
        }
        if let Some(cards) = &self.uncategorized {
            map.serialize_entry(UNCATEGORIZED_KEY, cards)?;
        }
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.cards)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.write_str("an object of categories with card lists")
    }

    fn visit_map<A>(
        self,
        mut access: A,
    ) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut doc = Document::default();
        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                SETTINGS_FLAGS_KEY => doc.flags = Some(access.next_value()?),
                UNCATEGORIZED_KEY => doc.uncategorized = Some(access.next_value()?),
                _ => {
                    let cards: Vec<String> = access.next_value()?;
                    doc.upsert_category(key, cards);
                }
            }
        }
        Ok(doc)
    }
}
