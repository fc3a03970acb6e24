//! Genre domain model.

use chrono::{DateTime, Utc};

use crate::{
    model::genre::{GenreCategory, GenreDto},
    server::error::{internal::InternalError, AppError},
};

impl GenreCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
            Self::Academic => "Academic",
            Self::Leisure => "Leisure",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Fiction" => Some(Self::Fiction),
            "Non-Fiction" => Some(Self::NonFiction),
            "Academic" => Some(Self::Academic),
            "Leisure" => Some(Self::Leisure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub category: GenreCategory,
    pub created_at: DateTime<Utc>,
}

impl Genre {
    pub fn from_entity(entity: entity::genre::Model) -> Result<Self, AppError> {
        let category = GenreCategory::from_label(&entity.category).ok_or(
            InternalError::UnknownStoredValue {
                column: "genre.category",
                value: entity.category.clone(),
            },
        )?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            category,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> GenreDto {
        GenreDto {
            id: self.id,
            name: self.name,
            category: self.category,
            created_at: self.created_at,
        }
    }
}
