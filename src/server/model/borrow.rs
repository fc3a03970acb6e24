//! Borrow request domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::borrow::{BorrowRequestDto, BorrowStatus, BorrowedBookDto, LoanedBookDto},
    server::{
        error::{internal::InternalError, AppError},
        model::user::PublicProfile,
    },
};

impl BorrowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorrowRequest {
    pub id: i32,
    pub book_id: i32,
    pub owner_id: i32,
    pub requester_id: i32,
    pub requested_until: DateTime<Utc>,
    pub status: BorrowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BorrowRequest {
    pub fn from_entity(entity: entity::borrow_request::Model) -> Result<Self, AppError> {
        let status = BorrowStatus::from_label(&entity.status).ok_or(
            InternalError::UnknownStoredValue {
                column: "borrow_request.status",
                value: entity.status.clone(),
            },
        )?;

        Ok(Self {
            id: entity.id,
            book_id: entity.book_id,
            owner_id: entity.owner_id,
            requester_id: entity.requester_id,
            requested_until: entity.requested_until,
            status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == BorrowStatus::Pending
    }

    pub fn into_dto(self) -> BorrowRequestDto {
        BorrowRequestDto {
            id: self.id,
            book_id: self.book_id,
            owner_id: self.owner_id,
            requester_id: self.requester_id,
            requested_until: self.requested_until,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for opening a borrow request.
#[derive(Debug, Clone)]
pub struct CreateBorrowParams {
    pub book_id: i32,
    pub owner_id: i32,
    pub requester_id: i32,
    pub requested_until: DateTime<Utc>,
}

/// An accepted request with the owner the book came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowedBook {
    pub request: BorrowRequest,
    pub owner: PublicProfile,
}

impl BorrowedBook {
    pub fn into_dto(self) -> BorrowedBookDto {
        BorrowedBookDto {
            request: self.request.into_dto(),
            owner: self.owner.into_dto(),
        }
    }
}

/// An accepted request with the reader the book went to.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanedBook {
    pub request: BorrowRequest,
    pub requester: PublicProfile,
}

impl LoanedBook {
    pub fn into_dto(self) -> LoanedBookDto {
        LoanedBookDto {
            request: self.request.into_dto(),
            requester: self.requester.into_dto(),
        }
    }
}
