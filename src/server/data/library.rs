//! Per-reader library record repository.
//!
//! Each reader has at most one row holding the whole record as a JSON array plus a
//! `version` counter. Writes are conditional on the version read, so two requests
//! racing on the same record cannot silently overwrite each other.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::{library::LibraryError, AppError},
    model::{
        decode_json, encode_json,
        library::{LibraryRecord, StoredLibrary},
    },
};

pub struct LibraryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LibraryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    fn from_entity(entity: entity::user_library::Model) -> Result<StoredLibrary, AppError> {
        let mut record: LibraryRecord = decode_json("user_library.libraries", entity.libraries)?;
        record.sort();

        Ok(StoredLibrary {
            user_id: entity.user_id,
            record,
            version: entity.version,
            updated_at: entity.updated_at,
        })
    }

    /// Finds a reader's record with every shelf sorted by position.
    ///
    /// # Returns
    /// - `Ok(Some(StoredLibrary))` - The record and the version it was read at
    /// - `Ok(None)` - The reader has no record yet
    /// - `Err(AppError)` - Database error or unreadable record
    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<StoredLibrary>, AppError> {
        entity::prelude::UserLibrary::find()
            .filter(entity::user_library::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .map(Self::from_entity)
            .transpose()
    }

    /// Every stored record, ordered by reader id.
    pub async fn get_all(&self) -> Result<Vec<StoredLibrary>, AppError> {
        entity::prelude::UserLibrary::find()
            .order_by_asc(entity::user_library::Column::UserId)
            .all(self.db)
            .await?
            .into_iter()
            .map(Self::from_entity)
            .collect()
    }

    /// Writes a record.
    ///
    /// Inserts a new row when `expected_version` is `None`; otherwise updates the row
    /// only if it is still at `expected_version`, bumping the version by one.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the record
    /// - `record` - Full record to store
    /// - `expected_version` - Version the record was read at, `None` for a new record
    ///
    /// # Returns
    /// - `Ok(StoredLibrary)` - The record as stored, with its new version
    /// - `Err(LibraryError::VersionConflict)` - The row changed since it was read
    /// - `Err(AppError)` - Database error, including a concurrent first insert
    pub async fn save(
        &self,
        user_id: i32,
        record: &LibraryRecord,
        expected_version: Option<i32>,
    ) -> Result<StoredLibrary, AppError> {
        let now = Utc::now();
        let libraries = encode_json("user_library.libraries", record)?;

        let Some(version) = expected_version else {
            let entity = entity::user_library::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                libraries: ActiveValue::Set(libraries),
                version: ActiveValue::Set(0),
                added_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(self.db)
            .await?;

            return Self::from_entity(entity);
        };

        let result = entity::prelude::UserLibrary::update_many()
            .col_expr(entity::user_library::Column::Libraries, Expr::value(libraries))
            .col_expr(entity::user_library::Column::Version, Expr::value(version + 1))
            .col_expr(entity::user_library::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user_library::Column::UserId.eq(user_id))
            .filter(entity::user_library::Column::Version.eq(version))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(LibraryError::VersionConflict(user_id).into());
        }

        self.find_by_user(user_id)
            .await?
            .ok_or_else(|| LibraryError::RecordNotFound(user_id).into())
    }

    /// Deletes the records of the given readers.
    pub async fn delete_for_users(&self, user_ids: &[i32]) -> Result<u64, AppError> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::UserLibrary::delete_many()
            .filter(entity::user_library::Column::UserId.is_in(user_ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
