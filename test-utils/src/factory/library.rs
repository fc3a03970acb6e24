//! Library record factory.
//!
//! The record is stored as a JSON array of libraries, so the factory takes the raw
//! JSON and leaves shaping it to the test.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

pub struct LibraryFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    user_id: i32,
    libraries: serde_json::Value,
}

impl<'a, C: ConnectionTrait> LibraryFactory<'a, C> {
    pub fn new(db: &'a C, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            libraries: serde_json::json!([]),
        }
    }

    /// Sets the raw `libraries` JSON array.
    pub fn libraries(mut self, libraries: serde_json::Value) -> Self {
        self.libraries = libraries;
        self
    }

    pub async fn build(self) -> Result<entity::user_library::Model, DbErr> {
        let now = Utc::now();
        entity::user_library::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            libraries: ActiveValue::Set(self.libraries),
            version: ActiveValue::Set(0),
            added_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Builds the JSON for a single library holding one shelf with the given books.
///
/// Books are placed at positions `0..n` in the order given with default color
/// and source.
pub fn library_json(name: &str, book_ids: &[i32]) -> serde_json::Value {
    let placements: Vec<serde_json::Value> = book_ids
        .iter()
        .enumerate()
        .map(|(position, book_id)| {
            serde_json::json!({
                "bookId": book_id,
                "position": position,
                "readProgress": 0,
                "status": "reading",
                "color": "default",
                "source": { "sourceName": "", "sourceType": "owned" }
            })
        })
        .collect();

    serde_json::json!({
        "name": name,
        "shelves": [{ "shelfId": 1, "placements": placements }]
    })
}

/// Creates a record with one library called `name` holding the given books.
pub async fn create_library<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    name: &str,
    book_ids: &[i32],
) -> Result<entity::user_library::Model, DbErr> {
    LibraryFactory::new(db, user_id)
        .libraries(serde_json::json!([library_json(name, book_ids)]))
        .build()
        .await
}
