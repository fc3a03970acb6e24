//! Reader-side circle links.
//!
//! A link row records that a reader has joined a circle (`member`) or holds an open
//! invitation to it (`invite`). These rows back the `innerCircle` and `invites`
//! lists on a reader's profile.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::circle::{CircleMemberships, LinkKind},
};

pub struct UserCircleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserCircleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn add(&self, user_id: i32, circle_id: i32, kind: LinkKind) -> Result<(), AppError> {
        entity::user_circle::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            circle_id: ActiveValue::Set(circle_id),
            kind: ActiveValue::Set(kind.label().to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Removes a link.
    ///
    /// # Returns
    /// - `Ok(true)` - The link existed and was removed
    /// - `Ok(false)` - No such link
    /// - `Err(AppError::DbErr)` - Database error during delete
    pub async fn remove(
        &self,
        user_id: i32,
        circle_id: i32,
        kind: LinkKind,
    ) -> Result<bool, AppError> {
        let result = entity::prelude::UserCircle::delete_many()
            .filter(entity::user_circle::Column::UserId.eq(user_id))
            .filter(entity::user_circle::Column::CircleId.eq(circle_id))
            .filter(entity::user_circle::Column::Kind.eq(kind.label()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn exists(
        &self,
        user_id: i32,
        circle_id: i32,
        kind: LinkKind,
    ) -> Result<bool, AppError> {
        let link = entity::prelude::UserCircle::find()
            .filter(entity::user_circle::Column::UserId.eq(user_id))
            .filter(entity::user_circle::Column::CircleId.eq(circle_id))
            .filter(entity::user_circle::Column::Kind.eq(kind.label()))
            .one(self.db)
            .await?;

        Ok(link.is_some())
    }

    /// Joined and invited circles of one reader.
    pub async fn memberships(&self, user_id: i32) -> Result<CircleMemberships, AppError> {
        let links = entity::prelude::UserCircle::find()
            .filter(entity::user_circle::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_circle::Column::Id)
            .all(self.db)
            .await?;

        CircleMemberships::from_links(links)
    }

    /// Joined and invited circles of several readers in one query.
    ///
    /// Readers without links are absent from the map.
    pub async fn memberships_for_many(
        &self,
        user_ids: &[i32],
    ) -> Result<HashMap<i32, CircleMemberships>, AppError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut grouped: HashMap<i32, Vec<entity::user_circle::Model>> = HashMap::new();
        for link in entity::prelude::UserCircle::find()
            .filter(entity::user_circle::Column::UserId.is_in(user_ids.iter().copied()))
            .order_by_asc(entity::user_circle::Column::Id)
            .all(self.db)
            .await?
        {
            grouped.entry(link.user_id).or_default().push(link);
        }

        grouped
            .into_iter()
            .map(|(user_id, links)| Ok((user_id, CircleMemberships::from_links(links)?)))
            .collect()
    }

    /// Removes every link to a circle, pulling it from all readers' lists.
    pub async fn delete_for_circle(&self, circle_id: i32) -> Result<u64, AppError> {
        let result = entity::prelude::UserCircle::delete_many()
            .filter(entity::user_circle::Column::CircleId.eq(circle_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_for_users(&self, user_ids: &[i32]) -> Result<u64, AppError> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::UserCircle::delete_many()
            .filter(entity::user_circle::Column::UserId.is_in(user_ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
