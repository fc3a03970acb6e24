//! Inner circle service.
//!
//! Membership lives in two places: the circle's member entries and the reader-side
//! link rows behind `innerCircle` and `invites`. Every use case that touches both
//! runs in one transaction.
//!
//! Entry transitions:
//! - invite: none, `Reject` or removed -> `Pending`
//! - accept: `Pending` -> `Accept`
//! - reject: `Pending` -> `Reject`
//! - remove: active member -> removed (entry kept)
//! - leave: active member -> entry deleted

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::circle::{CircleRole, InviteStatus},
    server::{
        data::{
            inner_circle::InnerCircleRepository, user::UserRepository,
            user_circle::UserCircleRepository,
        },
        error::{auth::AuthError, AppError},
        model::circle::{
            add_unique, remove_value, CircleWithMembers, CreateCircleParams, InnerCircle,
            LinkKind, Member,
        },
    },
};

/// A set-like list on the circle that admins edit one value at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleList {
    Genres,
    Isbns,
}

impl CircleList {
    fn noun(&self) -> &'static str {
        match self {
            Self::Genres => "Genre",
            Self::Isbns => "ISBN",
        }
    }
}

pub struct CircleService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> CircleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load<C: ConnectionTrait>(conn: &C, circle_id: i32) -> Result<CircleWithMembers, AppError> {
        InnerCircleRepository::new(conn)
            .find_with_members(circle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Circle {} not found", circle_id)))
    }

    fn require_admin(circle: &CircleWithMembers, user_id: i32) -> Result<(), AppError> {
        if !circle.is_admin(user_id) {
            return Err(AuthError::NotCircleAdmin {
                user_id,
                circle_id: circle.circle.id,
            }
            .into());
        }

        Ok(())
    }

    fn member_not_found(circle_id: i32, user_id: i32) -> AppError {
        AppError::NotFound(format!(
            "User {} is not a member of circle {}",
            user_id, circle_id
        ))
    }

    /// Creates a circle with the creator as its first accepted ICAdmin.
    ///
    /// # Returns
    /// - `Ok(CircleWithMembers)` - The new circle
    /// - `Err(AppError::Conflict)` - Circle name already taken
    pub async fn create(&self, params: CreateCircleParams) -> Result<CircleWithMembers, AppError> {
        let creator = params.created_by;
        let txn = self.db.begin().await?;
        let circles = InnerCircleRepository::new(&txn);

        if circles.name_exists(&params.name).await? {
            return Err(AppError::Conflict(format!(
                "Circle '{}' already exists",
                params.name
            )));
        }

        let circle = circles.create(params).await?;
        circles
            .add_member(
                circle.id,
                creator,
                CircleRole::IcAdmin,
                InviteStatus::Accept,
                creator,
            )
            .await?;
        UserCircleRepository::new(&txn)
            .add(creator, circle.id, LinkKind::Member)
            .await?;

        let created = Self::load(&txn, circle.id).await?;
        txn.commit().await?;

        tracing::info!("User {} created circle {}", creator, created.circle.id);

        Ok(created)
    }

    /// Invites a reader.
    ///
    /// A reader who rejected an earlier invitation or was removed gets their entry
    /// reset to a fresh pending invitation.
    ///
    /// # Returns
    /// - `Ok(Member)` - The pending entry
    /// - `Err(AuthError::NotCircleAdmin)` - Caller is not a current ICAdmin
    /// - `Err(AppError::NotFound)` - Circle or invitee missing
    /// - `Err(AppError::Conflict)` - Invitee is already a member or already invited
    pub async fn invite(
        &self,
        admin_id: i32,
        circle_id: i32,
        invitee_id: i32,
    ) -> Result<Member, AppError> {
        let txn = self.db.begin().await?;
        let circle = Self::load(&txn, circle_id).await?;
        Self::require_admin(&circle, admin_id)?;

        UserRepository::new(&txn)
            .find_by_id(invitee_id)
            .await?
            .filter(|u| u.lifecycle.is_active())
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", invitee_id)))?;

        let circles = InnerCircleRepository::new(&txn);
        let member = match circle.member(invitee_id) {
            Some(m) if m.is_active_member() => {
                return Err(AppError::Conflict(format!(
                    "User {} is already a member of circle {}",
                    invitee_id, circle_id
                )));
            }
            Some(m) if m.invite_status == InviteStatus::Pending && !m.is_removed => {
                return Err(AppError::Conflict(format!(
                    "User {} is already invited to circle {}",
                    invitee_id, circle_id
                )));
            }
            Some(_) => circles
                .reset_to_pending(circle_id, invitee_id, admin_id)
                .await?
                .ok_or_else(|| Self::member_not_found(circle_id, invitee_id))?,
            None => {
                circles
                    .add_member(
                        circle_id,
                        invitee_id,
                        CircleRole::Member,
                        InviteStatus::Pending,
                        admin_id,
                    )
                    .await?
            }
        };

        UserCircleRepository::new(&txn)
            .add(invitee_id, circle_id, LinkKind::Invite)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} invited user {} to circle {}",
            admin_id,
            invitee_id,
            circle_id
        );

        Ok(member)
    }

    /// Accepts an invitation, moving the circle from `invites` to `innerCircle`.
    ///
    /// # Returns
    /// - `Ok(Member)` - The accepted entry
    /// - `Err(AppError::NotFound)` - No open invitation, including a retried accept
    pub async fn accept_invite(&self, user_id: i32, circle_id: i32) -> Result<Member, AppError> {
        self.answer_invite(user_id, circle_id, InviteStatus::Accept)
            .await
    }

    /// Rejects an invitation, removing it from `invites`.
    pub async fn reject_invite(&self, user_id: i32, circle_id: i32) -> Result<Member, AppError> {
        self.answer_invite(user_id, circle_id, InviteStatus::Reject)
            .await
    }

    async fn answer_invite(
        &self,
        user_id: i32,
        circle_id: i32,
        answer: InviteStatus,
    ) -> Result<Member, AppError> {
        let txn = self.db.begin().await?;
        let links = UserCircleRepository::new(&txn);

        if !links.remove(user_id, circle_id, LinkKind::Invite).await? {
            return Err(AppError::NotFound(format!(
                "No pending invitation to circle {}",
                circle_id
            )));
        }

        let member = InnerCircleRepository::new(&txn)
            .set_invite_status(circle_id, user_id, answer)
            .await?
            .ok_or_else(|| Self::member_not_found(circle_id, user_id))?;

        if answer == InviteStatus::Accept {
            links.add(user_id, circle_id, LinkKind::Member).await?;
        }

        txn.commit().await?;

        tracing::info!(
            "User {} answered invitation to circle {} with {}",
            user_id,
            circle_id,
            answer.label()
        );

        Ok(member)
    }

    /// Leaves a circle. The creator cannot leave.
    pub async fn leave(&self, user_id: i32, circle_id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let circle = Self::load(&txn, circle_id).await?;

        if !circle.is_active_member(user_id) {
            return Err(AuthError::NotCircleMember { user_id, circle_id }.into());
        }
        if circle.circle.is_creator(user_id) {
            return Err(AuthError::CircleCreatorProtected(circle_id).into());
        }

        InnerCircleRepository::new(&txn)
            .delete_member(circle_id, user_id)
            .await?;
        UserCircleRepository::new(&txn)
            .remove(user_id, circle_id, LinkKind::Member)
            .await?;

        txn.commit().await?;

        tracing::info!("User {} left circle {}", user_id, circle_id);

        Ok(())
    }

    /// Removes a member, keeping their entry marked as removed.
    ///
    /// # Returns
    /// - `Ok(Member)` - The removed entry
    /// - `Err(AuthError::NotCircleAdmin)` - Caller is not a current ICAdmin
    /// - `Err(AuthError::CircleCreatorProtected)` - Target is the creator
    /// - `Err(AppError::NotFound)` - Target is not an active member
    pub async fn remove_member(
        &self,
        admin_id: i32,
        circle_id: i32,
        target_id: i32,
    ) -> Result<Member, AppError> {
        let txn = self.db.begin().await?;
        let circle = Self::load(&txn, circle_id).await?;
        Self::require_admin(&circle, admin_id)?;

        if circle.circle.is_creator(target_id) {
            return Err(AuthError::CircleCreatorProtected(circle_id).into());
        }
        if !circle.is_active_member(target_id) {
            return Err(Self::member_not_found(circle_id, target_id));
        }

        let member = InnerCircleRepository::new(&txn)
            .mark_removed(circle_id, target_id, Utc::now())
            .await?
            .ok_or_else(|| Self::member_not_found(circle_id, target_id))?;
        UserCircleRepository::new(&txn)
            .remove(target_id, circle_id, LinkKind::Member)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} removed user {} from circle {}",
            admin_id,
            target_id,
            circle_id
        );

        Ok(member)
    }

    /// Adds a value to the circle's genre or ISBN list.
    ///
    /// # Returns
    /// - `Ok(InnerCircle)` - Circle with the value added
    /// - `Err(AuthError::NotCircleAdmin)` - Caller is not a current ICAdmin
    /// - `Err(AppError::Conflict)` - Value already present
    pub async fn add_to_list(
        &self,
        admin_id: i32,
        circle_id: i32,
        list: CircleList,
        value: &str,
    ) -> Result<InnerCircle, AppError> {
        self.edit_list(admin_id, circle_id, list, |values| {
            if add_unique(values, value) {
                Ok(())
            } else {
                Err(AppError::Conflict(format!(
                    "{} '{}' is already in circle {}",
                    list.noun(),
                    value,
                    circle_id
                )))
            }
        })
        .await
    }

    /// Removes a value from the circle's genre or ISBN list.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Value not present
    pub async fn remove_from_list(
        &self,
        admin_id: i32,
        circle_id: i32,
        list: CircleList,
        value: &str,
    ) -> Result<InnerCircle, AppError> {
        self.edit_list(admin_id, circle_id, list, |values| {
            if remove_value(values, value) {
                Ok(())
            } else {
                Err(AppError::NotFound(format!(
                    "{} '{}' is not in circle {}",
                    list.noun(),
                    value,
                    circle_id
                )))
            }
        })
        .await
    }

    async fn edit_list<F>(
        &self,
        admin_id: i32,
        circle_id: i32,
        list: CircleList,
        edit: F,
    ) -> Result<InnerCircle, AppError>
    where
        F: FnOnce(&mut Vec<String>) -> Result<(), AppError>,
    {
        let txn = self.db.begin().await?;
        let circle = Self::load(&txn, circle_id).await?;
        Self::require_admin(&circle, admin_id)?;

        let circles = InnerCircleRepository::new(&txn);
        let mut inner = circle.circle;
        match list {
            CircleList::Genres => {
                edit(&mut inner.genres)?;
                circles.set_genres(circle_id, &inner.genres).await?;
            }
            CircleList::Isbns => {
                edit(&mut inner.isbns)?;
                circles.set_isbns(circle_id, &inner.isbns).await?;
            }
        }

        let updated = circles
            .find_by_id(circle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Circle {} not found", circle_id)))?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Makes an active member an ICAdmin.
    pub async fn promote(
        &self,
        admin_id: i32,
        circle_id: i32,
        target_id: i32,
    ) -> Result<Member, AppError> {
        let circle = Self::load(self.db, circle_id).await?;
        Self::require_admin(&circle, admin_id)?;

        if !circle.is_active_member(target_id) {
            return Err(Self::member_not_found(circle_id, target_id));
        }
        if circle.is_admin(target_id) {
            return Err(AppError::Conflict(format!(
                "User {} is already an admin of circle {}",
                target_id, circle_id
            )));
        }

        InnerCircleRepository::new(self.db)
            .set_role(circle_id, target_id, CircleRole::IcAdmin)
            .await?
            .ok_or_else(|| Self::member_not_found(circle_id, target_id))
    }

    /// Turns an ICAdmin back into a plain member.
    ///
    /// # Returns
    /// - `Ok(Member)` - The demoted entry
    /// - `Err(AuthError::CircleCreatorProtected)` - Target is the creator
    /// - `Err(AppError::Conflict)` - Target is not an admin
    /// - `Err(AppError::BadRequest)` - Target is the last admin
    pub async fn demote(
        &self,
        admin_id: i32,
        circle_id: i32,
        target_id: i32,
    ) -> Result<Member, AppError> {
        let circle = Self::load(self.db, circle_id).await?;
        Self::require_admin(&circle, admin_id)?;

        if circle.member(target_id).is_none() {
            return Err(Self::member_not_found(circle_id, target_id));
        }
        if !circle.is_admin(target_id) {
            return Err(AppError::Conflict(format!(
                "User {} is not an admin of circle {}",
                target_id, circle_id
            )));
        }
        if circle.circle.is_creator(target_id) {
            return Err(AuthError::CircleCreatorProtected(circle_id).into());
        }
        if circle.admin_count() <= 1 {
            return Err(AppError::BadRequest(format!(
                "Circle {} must keep at least one admin",
                circle_id
            )));
        }

        InnerCircleRepository::new(self.db)
            .set_role(circle_id, target_id, CircleRole::Member)
            .await?
            .ok_or_else(|| Self::member_not_found(circle_id, target_id))
    }

    /// Deletes a circle, pulling it from every reader's lists first.
    pub async fn delete(&self, admin_id: i32, circle_id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let circle = Self::load(&txn, circle_id).await?;
        Self::require_admin(&circle, admin_id)?;

        let unlinked = UserCircleRepository::new(&txn)
            .delete_for_circle(circle_id)
            .await?;
        InnerCircleRepository::new(&txn).delete(circle_id).await?;

        txn.commit().await?;

        tracing::info!(
            "User {} deleted circle {}, unlinking {} readers",
            admin_id,
            circle_id,
            unlinked
        );

        Ok(())
    }

    /// The circle and its member list, visible to current members only.
    pub async fn members(&self, user_id: i32, circle_id: i32) -> Result<CircleWithMembers, AppError> {
        let circle = Self::load(self.db, circle_id).await?;

        if !circle.is_active_member(user_id) {
            return Err(AuthError::NotCircleMember { user_id, circle_id }.into());
        }

        Ok(circle)
    }

    /// Circles the reader has joined.
    pub async fn my_circles(&self, user_id: i32) -> Result<Vec<InnerCircle>, AppError> {
        let memberships = UserCircleRepository::new(self.db)
            .memberships(user_id)
            .await?;

        InnerCircleRepository::new(self.db)
            .find_by_ids(&memberships.inner_circle)
            .await
    }

    /// Circles the reader is invited to and has not answered.
    pub async fn my_invites(&self, user_id: i32) -> Result<Vec<InnerCircle>, AppError> {
        let memberships = UserCircleRepository::new(self.db)
            .memberships(user_id)
            .await?;

        InnerCircleRepository::new(self.db)
            .find_by_ids(&memberships.invites)
            .await
    }
}
