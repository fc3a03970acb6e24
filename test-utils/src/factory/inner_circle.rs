//! Inner circle and member factories.
//!
//! Member entries and the `user_circle` link rows are written together so the
//! seeded state matches what the circle service produces.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Factory for circles. `build` also seeds the creator as an accepted ICAdmin.
pub struct CircleFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    created_by: i32,
    circle_name: String,
    genres: Vec<String>,
    isbns: Vec<String>,
}

impl<'a, C: ConnectionTrait> CircleFactory<'a, C> {
    pub fn new(db: &'a C, created_by: i32) -> Self {
        Self {
            db,
            created_by,
            circle_name: format!("Circle {}", next_id()),
            genres: Vec::new(),
            isbns: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.circle_name = name.into();
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbns.push(isbn.into());
        self
    }

    pub async fn build(self) -> Result<entity::inner_circle::Model, DbErr> {
        let now = Utc::now();
        let circle = entity::inner_circle::ActiveModel {
            circle_name: ActiveValue::Set(self.circle_name),
            circle_description: ActiveValue::Set(None),
            created_by: ActiveValue::Set(self.created_by),
            genres: ActiveValue::Set(serde_json::json!(self.genres)),
            isbns: ActiveValue::Set(serde_json::json!(self.isbns)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        MemberFactory::new(self.db, circle.id, self.created_by)
            .role("ICAdmin")
            .added_by(self.created_by)
            .build()
            .await?;

        Ok(circle)
    }
}

/// Factory for member entries.
///
/// Defaults to an accepted `Member`; an accepted entry gets a `member` link and a
/// pending one gets an `invite` link.
pub struct MemberFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    circle_id: i32,
    user_id: i32,
    role: String,
    invite_status: String,
    added_by: i32,
    is_removed: bool,
}

impl<'a, C: ConnectionTrait> MemberFactory<'a, C> {
    pub fn new(db: &'a C, circle_id: i32, user_id: i32) -> Self {
        Self {
            db,
            circle_id,
            user_id,
            role: "Member".to_string(),
            invite_status: "Accept".to_string(),
            added_by: user_id,
            is_removed: false,
        }
    }

    /// Sets the role label, `ICAdmin` or `Member`.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the invite status label, `Pending`, `Accept` or `Reject`.
    pub fn invite_status(mut self, status: impl Into<String>) -> Self {
        self.invite_status = status.into();
        self
    }

    pub fn added_by(mut self, added_by: i32) -> Self {
        self.added_by = added_by;
        self
    }

    pub fn removed(mut self) -> Self {
        self.is_removed = true;
        self
    }

    pub async fn build(self) -> Result<entity::inner_circle_member::Model, DbErr> {
        let now = Utc::now();
        let member = entity::inner_circle_member::ActiveModel {
            circle_id: ActiveValue::Set(self.circle_id),
            user_id: ActiveValue::Set(self.user_id),
            role: ActiveValue::Set(self.role),
            invite_status: ActiveValue::Set(self.invite_status.clone()),
            added_by: ActiveValue::Set(self.added_by),
            added_at: ActiveValue::Set(now),
            is_removed: ActiveValue::Set(self.is_removed),
            removed_at: ActiveValue::Set(self.is_removed.then_some(now)),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let kind = match (self.invite_status.as_str(), self.is_removed) {
            ("Accept", false) => Some("member"),
            ("Pending", _) => Some("invite"),
            _ => None,
        };

        if let Some(kind) = kind {
            entity::user_circle::ActiveModel {
                user_id: ActiveValue::Set(self.user_id),
                circle_id: ActiveValue::Set(self.circle_id),
                kind: ActiveValue::Set(kind.to_string()),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(member)
    }
}

/// Creates a circle owned by `created_by`, seeding them as ICAdmin.
pub async fn create_circle<C: ConnectionTrait>(
    db: &C,
    created_by: i32,
) -> Result<entity::inner_circle::Model, DbErr> {
    CircleFactory::new(db, created_by).build().await
}

/// Adds `user_id` to the circle as an accepted member.
pub async fn create_member<C: ConnectionTrait>(
    db: &C,
    circle_id: i32,
    user_id: i32,
) -> Result<entity::inner_circle_member::Model, DbErr> {
    MemberFactory::new(db, circle_id, user_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory::user::create_user};
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    #[tokio::test]
    async fn seeds_creator_as_admin_with_member_link() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_circle_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let creator = create_user(db).await?;
        let circle = create_circle(db, creator.id).await?;

        let members = entity::prelude::InnerCircleMember::find()
            .filter(entity::inner_circle_member::Column::CircleId.eq(circle.id))
            .all(db)
            .await?;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].role, "ICAdmin");
        assert_eq!(members[0].invite_status, "Accept");

        let links = entity::prelude::UserCircle::find()
            .filter(entity::user_circle::Column::UserId.eq(creator.id))
            .all(db)
            .await?;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].kind, "member");

        Ok(())
    }
}
