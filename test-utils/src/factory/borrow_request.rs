//! Borrow request factory.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

pub struct BorrowRequestFactory<'a, C: ConnectionTrait> {
    db: &'a C,
    book_id: i32,
    owner_id: i32,
    requester_id: i32,
    requested_until: DateTime<Utc>,
    status: String,
}

impl<'a, C: ConnectionTrait> BorrowRequestFactory<'a, C> {
    /// Creates a pending request due two weeks from now.
    pub fn new(db: &'a C, book_id: i32, owner_id: i32, requester_id: i32) -> Self {
        Self {
            db,
            book_id,
            owner_id,
            requester_id,
            requested_until: Utc::now() + Duration::days(14),
            status: "pending".to_string(),
        }
    }

    /// Sets the stored status, one of `pending`, `accepted` or `rejected`.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn requested_until(mut self, until: DateTime<Utc>) -> Self {
        self.requested_until = until;
        self
    }

    pub async fn build(self) -> Result<entity::borrow_request::Model, DbErr> {
        let now = Utc::now();
        entity::borrow_request::ActiveModel {
            book_id: ActiveValue::Set(self.book_id),
            owner_id: ActiveValue::Set(self.owner_id),
            requester_id: ActiveValue::Set(self.requester_id),
            requested_until: ActiveValue::Set(self.requested_until),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_borrow_request<C: ConnectionTrait>(
    db: &C,
    book_id: i32,
    owner_id: i32,
    requester_id: i32,
) -> Result<entity::borrow_request::Model, DbErr> {
    BorrowRequestFactory::new(db, book_id, owner_id, requester_id)
        .build()
        .await
}
