//! Borrow request repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::borrow::BorrowStatus,
    server::{
        error::AppError,
        model::borrow::{BorrowRequest, CreateBorrowParams},
    },
};

pub struct BorrowRequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BorrowRequestRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending request.
    pub async fn create(&self, params: CreateBorrowParams) -> Result<BorrowRequest, AppError> {
        let now = Utc::now();
        let entity = entity::borrow_request::ActiveModel {
            book_id: ActiveValue::Set(params.book_id),
            owner_id: ActiveValue::Set(params.owner_id),
            requester_id: ActiveValue::Set(params.requester_id),
            requested_until: ActiveValue::Set(params.requested_until),
            status: ActiveValue::Set(BorrowStatus::Pending.label().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        BorrowRequest::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<BorrowRequest>, AppError> {
        entity::prelude::BorrowRequest::find_by_id(id)
            .one(self.db)
            .await?
            .map(BorrowRequest::from_entity)
            .transpose()
    }

    /// Checks for an open request from the requester for the same owner and book.
    pub async fn pending_exists(
        &self,
        book_id: i32,
        owner_id: i32,
        requester_id: i32,
    ) -> Result<bool, AppError> {
        let count = entity::prelude::BorrowRequest::find()
            .filter(entity::borrow_request::Column::BookId.eq(book_id))
            .filter(entity::borrow_request::Column::OwnerId.eq(owner_id))
            .filter(entity::borrow_request::Column::RequesterId.eq(requester_id))
            .filter(entity::borrow_request::Column::Status.eq(BorrowStatus::Pending.label()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Moves a pending request to a terminal status.
    ///
    /// A single `UPDATE` guarded on the row still being pending, so of two racing
    /// transitions only the first to write succeeds.
    ///
    /// # Returns
    /// - `Ok(Some(BorrowRequest))` - Request transitioned
    /// - `Ok(None)` - Request missing or no longer pending
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn transition(
        &self,
        id: i32,
        status: BorrowStatus,
    ) -> Result<Option<BorrowRequest>, AppError> {
        let result = entity::prelude::BorrowRequest::update_many()
            .col_expr(
                entity::borrow_request::Column::Status,
                Expr::value(status.label().to_string()),
            )
            .col_expr(entity::borrow_request::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::borrow_request::Column::Id.eq(id))
            .filter(entity::borrow_request::Column::Status.eq(BorrowStatus::Pending.label()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Requests sent by the reader, newest first.
    pub async fn find_by_requester(
        &self,
        requester_id: i32,
        status: Option<BorrowStatus>,
    ) -> Result<Vec<BorrowRequest>, AppError> {
        self.find_where(
            Condition::all().add(entity::borrow_request::Column::RequesterId.eq(requester_id)),
            status,
        )
        .await
    }

    /// Requests received by the owner, newest first.
    pub async fn find_by_owner(
        &self,
        owner_id: i32,
        status: Option<BorrowStatus>,
    ) -> Result<Vec<BorrowRequest>, AppError> {
        self.find_where(
            Condition::all().add(entity::borrow_request::Column::OwnerId.eq(owner_id)),
            status,
        )
        .await
    }

    async fn find_where(
        &self,
        party: Condition,
        status: Option<BorrowStatus>,
    ) -> Result<Vec<BorrowRequest>, AppError> {
        let mut query = entity::prelude::BorrowRequest::find().filter(party);
        if let Some(status) = status {
            query = query.filter(entity::borrow_request::Column::Status.eq(status.label()));
        }

        query
            .order_by_desc(entity::borrow_request::Column::CreatedAt)
            .order_by_desc(entity::borrow_request::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(BorrowRequest::from_entity)
            .collect()
    }

    /// Deletes every request where any of the readers is owner or requester.
    pub async fn delete_for_users(&self, user_ids: &[i32]) -> Result<u64, AppError> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::BorrowRequest::delete_many()
            .filter(
                Condition::any()
                    .add(entity::borrow_request::Column::OwnerId.is_in(user_ids.iter().copied()))
                    .add(
                        entity::borrow_request::Column::RequesterId
                            .is_in(user_ids.iter().copied()),
                    ),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
