//! Borrow request service.
//!
//! A request moves from `pending` to `accepted` or `rejected` exactly once, and only
//! the book's owner moves it. Accepting places the book in the requester's
//! "Borrowed Books" library in the same transaction as the status change.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::borrow::BorrowStatus,
    server::{
        data::{
            borrow_request::BorrowRequestRepository, library::LibraryRepository,
            user::UserRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            borrow::{BorrowRequest, BorrowedBook, CreateBorrowParams, LoanedBook},
            library::{PlaceBook, Source, BORROWED_LIBRARY},
            user::PublicProfile,
        },
        service::library::mutate_record,
    },
};

pub struct BorrowService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> BorrowService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a borrow request.
    ///
    /// # Returns
    /// - `Ok(BorrowRequest)` - The pending request
    /// - `Err(AppError::BadRequest)` - Requesting from oneself, or a due date not in the future
    /// - `Err(AppError::NotFound)` - Owner missing, or the book is not in the owner's libraries
    /// - `Err(AppError::Conflict)` - The same request is already pending
    pub async fn create(&self, params: CreateBorrowParams) -> Result<BorrowRequest, AppError> {
        if params.requester_id == params.owner_id {
            return Err(AppError::BadRequest(
                "You cannot borrow your own book".to_string(),
            ));
        }
        if params.requested_until <= Utc::now() {
            return Err(AppError::BadRequest(
                "Requested until date must be in the future".to_string(),
            ));
        }

        let owner = UserRepository::new(self.db)
            .find_by_id(params.owner_id)
            .await?
            .filter(|u| u.lifecycle.is_active())
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", params.owner_id)))?;

        let owns_book = LibraryRepository::new(self.db)
            .find_by_user(owner.id)
            .await?
            .is_some_and(|stored| stored.record.contains(params.book_id));
        if !owns_book {
            return Err(AppError::NotFound(format!(
                "User {} has no copy of book {}",
                owner.id, params.book_id
            )));
        }

        let repo = BorrowRequestRepository::new(self.db);
        if repo
            .pending_exists(params.book_id, params.owner_id, params.requester_id)
            .await?
        {
            return Err(AppError::Conflict(
                "A request for this book is already pending".to_string(),
            ));
        }

        let request = repo.create(params).await?;
        tracing::info!(
            "User {} requested book {} from user {}",
            request.requester_id,
            request.book_id,
            request.owner_id
        );

        Ok(request)
    }

    /// Accepts a pending request and places the book for the requester.
    ///
    /// The book goes to the front of the first "Borrowed Books" shelf with room; a new
    /// shelf is added once every shelf is full.
    ///
    /// # Returns
    /// - `Ok(BorrowRequest)` - The accepted request
    /// - `Err(AppError::NotFound)` - No such request
    /// - `Err(AuthError::NotRequestOwner)` - Caller does not own the book
    /// - `Err(AppError::Conflict)` - Request already accepted or rejected
    /// - `Err(AppError::LibraryErr)` - The book cannot be placed; nothing is written
    pub async fn accept(&self, owner_id: i32, request_id: i32) -> Result<BorrowRequest, AppError> {
        let txn = self.db.begin().await?;

        let request = Self::check_answerable(
            BorrowRequestRepository::new(&txn).find_by_id(request_id).await?,
            owner_id,
            request_id,
        )?;

        let accepted = BorrowRequestRepository::new(&txn)
            .transition(request_id, BorrowStatus::Accepted)
            .await?
            .ok_or_else(|| Self::already_answered(request_id))?;

        let owner_name = UserRepository::new(&txn)
            .find_by_id(request.owner_id)
            .await?
            .map(|u| u.full_name)
            .unwrap_or_default();

        mutate_record(&txn, request.requester_id, true, |record| {
            let shelf_index = record.shelf_with_room(BORROWED_LIBRARY, request.book_id)?;
            record.place(PlaceBook {
                book_id: request.book_id,
                library_name: BORROWED_LIBRARY.to_string(),
                shelf_index,
                position: 0,
                read_progress: 0,
                status: None,
                source: Source::borrowed(owner_name),
            })
        })
        .await?;

        txn.commit().await?;

        tracing::info!(
            "User {} lent book {} to user {}",
            accepted.owner_id,
            accepted.book_id,
            accepted.requester_id
        );

        Ok(accepted)
    }

    /// Rejects a pending request.
    ///
    /// The status write is conditional on the request still being pending, so a reject
    /// racing an accept fails with Conflict instead of overwriting it.
    pub async fn reject(&self, owner_id: i32, request_id: i32) -> Result<BorrowRequest, AppError> {
        let repo = BorrowRequestRepository::new(self.db);

        Self::check_answerable(repo.find_by_id(request_id).await?, owner_id, request_id)?;

        repo.transition(request_id, BorrowStatus::Rejected)
            .await?
            .ok_or_else(|| Self::already_answered(request_id))
    }

    fn check_answerable(
        request: Option<BorrowRequest>,
        owner_id: i32,
        request_id: i32,
    ) -> Result<BorrowRequest, AppError> {
        let request = request
            .ok_or_else(|| AppError::NotFound(format!("Borrow request {} not found", request_id)))?;

        if request.owner_id != owner_id {
            return Err(AuthError::NotRequestOwner {
                user_id: owner_id,
                request_id,
            }
            .into());
        }
        if !request.is_pending() {
            return Err(AppError::Conflict(format!(
                "Borrow request {} was already {}",
                request_id,
                request.status.label()
            )));
        }

        Ok(request)
    }

    fn already_answered(request_id: i32) -> AppError {
        AppError::Conflict(format!("Borrow request {} was already answered", request_id))
    }

    /// Requests the reader has sent, newest first.
    pub async fn sent(&self, user_id: i32) -> Result<Vec<BorrowRequest>, AppError> {
        BorrowRequestRepository::new(self.db)
            .find_by_requester(user_id, None)
            .await
    }

    /// Requests the reader has received, newest first.
    pub async fn received(&self, user_id: i32) -> Result<Vec<BorrowRequest>, AppError> {
        BorrowRequestRepository::new(self.db)
            .find_by_owner(user_id, None)
            .await
    }

    /// Accepted requests where the reader is the borrower, with each owner's profile.
    pub async fn borrowed(&self, user_id: i32) -> Result<Vec<BorrowedBook>, AppError> {
        let requests = BorrowRequestRepository::new(self.db)
            .find_by_requester(user_id, Some(BorrowStatus::Accepted))
            .await?;
        let ids: Vec<i32> = requests.iter().map(|r| r.owner_id).collect();
        let profiles = self.profiles(&ids).await?;

        Ok(requests
            .into_iter()
            .filter_map(|request| {
                let owner = profiles.get(&request.owner_id)?.clone();
                Some(BorrowedBook { request, owner })
            })
            .collect())
    }

    /// Accepted requests where the reader is the owner, with each borrower's profile.
    pub async fn loaned(&self, user_id: i32) -> Result<Vec<LoanedBook>, AppError> {
        let requests = BorrowRequestRepository::new(self.db)
            .find_by_owner(user_id, Some(BorrowStatus::Accepted))
            .await?;
        let ids: Vec<i32> = requests.iter().map(|r| r.requester_id).collect();
        let profiles = self.profiles(&ids).await?;

        Ok(requests
            .into_iter()
            .filter_map(|request| {
                let requester = profiles.get(&request.requester_id)?.clone();
                Some(LoanedBook { request, requester })
            })
            .collect())
    }

    async fn profiles(&self, ids: &[i32]) -> Result<HashMap<i32, PublicProfile>, AppError> {
        let users = UserRepository::new(self.db).find_by_ids(ids).await?;

        Ok(users.iter().map(|u| (u.id, u.public_profile())).collect())
    }
}
