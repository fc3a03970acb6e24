//! Inner circle domain models.
//!
//! A circle has a creator, a member list with per-member role and invite status,
//! and user-side link rows that record which circles a reader has joined or been
//! invited to.

use chrono::{DateTime, Utc};

use crate::{
    model::circle::{
        CircleDto, CircleMembersDto, CircleRole, CreateCircleDto, InviteStatus, MemberDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        model::decode_json,
    },
};

impl CircleRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::IcAdmin => "ICAdmin",
            Self::Member => "Member",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ICAdmin" => Some(Self::IcAdmin),
            "Member" => Some(Self::Member),
            _ => None,
        }
    }
}

impl InviteStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accept => "Accept",
            Self::Reject => "Reject",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Pending" => Some(Self::Pending),
            "Accept" => Some(Self::Accept),
            "Reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Kind of a reader-side circle link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Outstanding invitation.
    Invite,
    /// Accepted membership.
    Member,
}

impl LinkKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Invite => "invite",
            Self::Member => "member",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "invite" => Some(Self::Invite),
            "member" => Some(Self::Member),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InnerCircle {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_by: i32,
    pub genres: Vec<String>,
    pub isbns: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InnerCircle {
    pub fn from_entity(entity: entity::inner_circle::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            name: entity.circle_name,
            description: entity.circle_description,
            created_by: entity.created_by,
            genres: decode_json("inner_circle.genres", entity.genres)?,
            isbns: decode_json("inner_circle.isbns", entity.isbns)?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn is_creator(&self, user_id: i32) -> bool {
        self.created_by == user_id
    }

    pub fn into_dto(self) -> CircleDto {
        CircleDto {
            id: self.id,
            circle_name: self.name,
            circle_description: self.description,
            created_by: self.created_by,
            circle_genre: self.genres,
            isbn: self.isbns,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// One entry of a circle's member list.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub user_id: i32,
    pub role: CircleRole,
    pub invite_status: InviteStatus,
    pub added_by: i32,
    pub added_at: DateTime<Utc>,
    pub is_removed: bool,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Member {
    pub fn from_entity(entity: entity::inner_circle_member::Model) -> Result<Self, AppError> {
        let role = CircleRole::from_label(&entity.role).ok_or(InternalError::UnknownStoredValue {
            column: "inner_circle_member.role",
            value: entity.role.clone(),
        })?;
        let invite_status = InviteStatus::from_label(&entity.invite_status).ok_or(
            InternalError::UnknownStoredValue {
                column: "inner_circle_member.invite_status",
                value: entity.invite_status.clone(),
            },
        )?;

        Ok(Self {
            user_id: entity.user_id,
            role,
            invite_status,
            added_by: entity.added_by,
            added_at: entity.added_at,
            is_removed: entity.is_removed,
            removed_at: entity.removed_at,
        })
    }

    /// Accepted and not removed.
    pub fn is_active_member(&self) -> bool {
        self.invite_status == InviteStatus::Accept && !self.is_removed
    }

    pub fn is_admin(&self) -> bool {
        self.is_active_member() && self.role == CircleRole::IcAdmin
    }

    pub fn into_dto(self) -> MemberDto {
        MemberDto {
            user_id: self.user_id,
            role: self.role,
            invite_status: self.invite_status,
            added_by: self.added_by,
            added_at: self.added_at,
            is_removed: self.is_removed,
            removed_at: self.removed_at,
        }
    }
}

/// A circle with its full member list.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleWithMembers {
    pub circle: InnerCircle,
    pub members: Vec<Member>,
}

impl CircleWithMembers {
    pub fn member(&self, user_id: i32) -> Option<&Member> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    pub fn is_admin(&self, user_id: i32) -> bool {
        self.member(user_id).is_some_and(Member::is_admin)
    }

    pub fn is_active_member(&self, user_id: i32) -> bool {
        self.member(user_id).is_some_and(Member::is_active_member)
    }

    pub fn admin_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_admin()).count()
    }

    pub fn into_dto(self) -> CircleMembersDto {
        CircleMembersDto {
            circle: self.circle.into_dto(),
            members: self.members.into_iter().map(Member::into_dto).collect(),
        }
    }
}

/// Parameters for creating a circle.
#[derive(Debug, Clone)]
pub struct CreateCircleParams {
    pub name: String,
    pub description: Option<String>,
    pub created_by: i32,
    pub genres: Vec<String>,
    pub isbns: Vec<String>,
}

impl CreateCircleParams {
    /// Builds creation parameters, dropping duplicate genres and ISBNs.
    pub fn from_dto(dto: CreateCircleDto, created_by: i32) -> Self {
        let mut genres = Vec::new();
        for genre in &dto.circle_genre {
            add_unique(&mut genres, genre.trim());
        }
        let mut isbns = Vec::new();
        for isbn in &dto.isbn {
            add_unique(&mut isbns, isbn.trim());
        }

        Self {
            name: dto.circle_name.trim().to_string(),
            description: dto.circle_description,
            created_by,
            genres,
            isbns,
        }
    }
}

/// Circles a reader has joined and circles they are invited to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircleMemberships {
    pub inner_circle: Vec<i32>,
    pub invites: Vec<i32>,
}

impl CircleMemberships {
    /// Groups link rows by kind. Rows with an unknown kind are rejected.
    pub fn from_links(links: Vec<entity::user_circle::Model>) -> Result<Self, AppError> {
        let mut memberships = Self::default();
        for link in links {
            match LinkKind::from_label(&link.kind) {
                Some(LinkKind::Member) => memberships.inner_circle.push(link.circle_id),
                Some(LinkKind::Invite) => memberships.invites.push(link.circle_id),
                None => {
                    return Err(InternalError::UnknownStoredValue {
                        column: "user_circle.kind",
                        value: link.kind,
                    }
                    .into())
                }
            }
        }

        Ok(memberships)
    }
}

/// Adds a value to a set-like list. Returns `false` when it was already present.
pub fn add_unique(values: &mut Vec<String>, value: &str) -> bool {
    if values.iter().any(|v| v == value) {
        return false;
    }
    values.push(value.to_string());
    true
}

/// Removes a value from a set-like list. Returns `false` when it was absent.
pub fn remove_value(values: &mut Vec<String>, value: &str) -> bool {
    let before = values.len();
    values.retain(|v| v != value);
    values.len() != before
}
