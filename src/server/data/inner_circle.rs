//! Inner circle and circle member repository.
//!
//! Circles live in `inner_circle`; each member entry is a row of
//! `inner_circle_member` unique per circle and user. The reader-side links are
//! handled by `UserCircleRepository`.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder,
};

use crate::{
    model::circle::{CircleRole, InviteStatus},
    server::{
        error::AppError,
        model::{
            circle::{CircleWithMembers, CreateCircleParams, InnerCircle, Member},
            encode_json,
        },
    },
};

pub struct InnerCircleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InnerCircleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a circle without members.
    pub async fn create(&self, params: CreateCircleParams) -> Result<InnerCircle, AppError> {
        let now = Utc::now();
        let entity = entity::inner_circle::ActiveModel {
            circle_name: ActiveValue::Set(params.name),
            circle_description: ActiveValue::Set(params.description),
            created_by: ActiveValue::Set(params.created_by),
            genres: ActiveValue::Set(encode_json("inner_circle.genres", &params.genres)?),
            isbns: ActiveValue::Set(encode_json("inner_circle.isbns", &params.isbns)?),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        InnerCircle::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<InnerCircle>, AppError> {
        entity::prelude::InnerCircle::find_by_id(id)
            .one(self.db)
            .await?
            .map(InnerCircle::from_entity)
            .transpose()
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        let entity = entity::prelude::InnerCircle::find()
            .filter(entity::inner_circle::Column::CircleName.eq(name))
            .one(self.db)
            .await?;

        Ok(entity.is_some())
    }

    /// Circles with the given ids, ordered by id.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<InnerCircle>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::InnerCircle::find()
            .filter(entity::inner_circle::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::inner_circle::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(InnerCircle::from_entity)
            .collect()
    }

    /// Ids of circles created by any of the given readers.
    pub async fn find_ids_created_by(&self, user_ids: &[i32]) -> Result<Vec<i32>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(entity::prelude::InnerCircle::find()
            .filter(entity::inner_circle::Column::CreatedBy.is_in(user_ids.iter().copied()))
            .order_by_asc(entity::inner_circle::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect())
    }

    /// Finds a circle together with every member entry, removed ones included.
    ///
    /// # Returns
    /// - `Ok(Some(CircleWithMembers))` - Circle and members in the order they were added
    /// - `Ok(None)` - No circle with that id
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn find_with_members(&self, id: i32) -> Result<Option<CircleWithMembers>, AppError> {
        let Some(circle) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let members = entity::prelude::InnerCircleMember::find()
            .filter(entity::inner_circle_member::Column::CircleId.eq(id))
            .order_by_asc(entity::inner_circle_member::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Member::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(CircleWithMembers { circle, members }))
    }

    /// Replaces the circle's genre list.
    pub async fn set_genres(&self, id: i32, genres: &[String]) -> Result<(), AppError> {
        self.update_circle(id, |active| {
            active.genres = ActiveValue::Set(encode_json("inner_circle.genres", &genres)?);
            Ok(())
        })
        .await
    }

    /// Replaces the circle's ISBN list.
    pub async fn set_isbns(&self, id: i32, isbns: &[String]) -> Result<(), AppError> {
        self.update_circle(id, |active| {
            active.isbns = ActiveValue::Set(encode_json("inner_circle.isbns", &isbns)?);
            Ok(())
        })
        .await
    }

    async fn update_circle<F>(&self, id: i32, apply: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut entity::inner_circle::ActiveModel) -> Result<(), AppError>,
    {
        let Some(entity) = entity::prelude::InnerCircle::find_by_id(id).one(self.db).await? else {
            return Err(AppError::NotFound(format!("Circle {} not found", id)));
        };

        let mut active = entity.into_active_model();
        apply(&mut active)?;
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Deletes a circle and every member entry. Reader-side links must be removed first.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        entity::prelude::InnerCircleMember::delete_many()
            .filter(entity::inner_circle_member::Column::CircleId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::InnerCircle::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Inserts a member entry.
    pub async fn add_member(
        &self,
        circle_id: i32,
        user_id: i32,
        role: CircleRole,
        invite_status: InviteStatus,
        added_by: i32,
    ) -> Result<Member, AppError> {
        let entity = entity::inner_circle_member::ActiveModel {
            circle_id: ActiveValue::Set(circle_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role.label().to_string()),
            invite_status: ActiveValue::Set(invite_status.label().to_string()),
            added_by: ActiveValue::Set(added_by),
            added_at: ActiveValue::Set(Utc::now()),
            is_removed: ActiveValue::Set(false),
            removed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Member::from_entity(entity)
    }

    async fn update_member<F>(
        &self,
        circle_id: i32,
        user_id: i32,
        apply: F,
    ) -> Result<Option<Member>, AppError>
    where
        F: FnOnce(&mut entity::inner_circle_member::ActiveModel),
    {
        let Some(entity) = entity::prelude::InnerCircleMember::find()
            .filter(entity::inner_circle_member::Column::CircleId.eq(circle_id))
            .filter(entity::inner_circle_member::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        apply(&mut active);

        Member::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Turns an existing entry back into a fresh pending invitation.
    pub async fn reset_to_pending(
        &self,
        circle_id: i32,
        user_id: i32,
        added_by: i32,
    ) -> Result<Option<Member>, AppError> {
        self.update_member(circle_id, user_id, |active| {
            active.role = ActiveValue::Set(CircleRole::Member.label().to_string());
            active.invite_status = ActiveValue::Set(InviteStatus::Pending.label().to_string());
            active.added_by = ActiveValue::Set(added_by);
            active.added_at = ActiveValue::Set(Utc::now());
            active.is_removed = ActiveValue::Set(false);
            active.removed_at = ActiveValue::Set(None);
        })
        .await
    }

    pub async fn set_invite_status(
        &self,
        circle_id: i32,
        user_id: i32,
        status: InviteStatus,
    ) -> Result<Option<Member>, AppError> {
        self.update_member(circle_id, user_id, |active| {
            active.invite_status = ActiveValue::Set(status.label().to_string());
        })
        .await
    }

    pub async fn set_role(
        &self,
        circle_id: i32,
        user_id: i32,
        role: CircleRole,
    ) -> Result<Option<Member>, AppError> {
        self.update_member(circle_id, user_id, |active| {
            active.role = ActiveValue::Set(role.label().to_string());
        })
        .await
    }

    /// Soft removes a member, keeping the entry with its removal time.
    pub async fn mark_removed(
        &self,
        circle_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> Result<Option<Member>, AppError> {
        self.update_member(circle_id, user_id, |active| {
            active.is_removed = ActiveValue::Set(true);
            active.removed_at = ActiveValue::Set(Some(at));
        })
        .await
    }

    /// Hard deletes a member entry.
    pub async fn delete_member(&self, circle_id: i32, user_id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::InnerCircleMember::delete_many()
            .filter(entity::inner_circle_member::Column::CircleId.eq(circle_id))
            .filter(entity::inner_circle_member::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes every member entry belonging to the given readers.
    pub async fn delete_members_for_users(&self, user_ids: &[i32]) -> Result<u64, AppError> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::InnerCircleMember::delete_many()
            .filter(entity::inner_circle_member::Column::UserId.is_in(user_ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
