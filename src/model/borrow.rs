use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::PublicProfileDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BorrowStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorrowRequestDto {
    pub book_id: i32,
    pub owner_id: i32,
    pub requested_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequestDto {
    pub id: i32,
    pub book_id: i32,
    pub owner_id: i32,
    pub requester_id: i32,
    pub requested_until: DateTime<Utc>,
    pub status: BorrowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An accepted request seen from the requester's side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowedBookDto {
    pub request: BorrowRequestDto,
    pub owner: PublicProfileDto,
}

/// An accepted request seen from the owner's side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanedBookDto {
    pub request: BorrowRequestDto,
    pub requester: PublicProfileDto,
}
