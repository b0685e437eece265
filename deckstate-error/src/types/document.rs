use std::any::Any;

use crate::{ErrorExt, StatusCode};

/// Ошибки формы документа в памяти.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Имя категории совпадает с зарезервированным ключом
    ReservedKey { key: String },
    /// В документе нет обязательной зарезервированной записи
    MissingReservedKey { key: String },
    /// Пустое имя категории
    EmptyCategoryName,
    /// Категория с таким именем уже есть
    DuplicateCategory { name: String },
    /// Категория не найдена
    UnknownCategory { name: String },
}

impl std::fmt::Display for DocumentError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::ReservedKey { key } => {
                write!(f, "Category name '{key}' is reserved")
            }
            Self::MissingReservedKey { key } => {
                write!(f, "Document has no '{key}' entry")
            }
            Self::EmptyCategoryName => write!(f, "Category name is empty"),
            Self::DuplicateCategory { name } => {
                write!(f, "Category already exists: {name}")
            }
            Self::UnknownCategory { name } => write!(f, "Category not found: {name}"),
        }
    }
}

impl std::error::Error for DocumentError {}

impl ErrorExt for DocumentError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ReservedKey { .. } | Self::EmptyCategoryName => StatusCode::InvalidKey,
            Self::MissingReservedKey { .. } => StatusCode::InvalidData,
            Self::DuplicateCategory { .. } => StatusCode::AlreadyExists,
            Self::UnknownCategory { .. } => StatusCode::NotFound,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
