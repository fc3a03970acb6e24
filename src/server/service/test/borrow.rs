use super::*;
use crate::{
    model::borrow::BorrowStatus,
    server::{
        data::{borrow_request::BorrowRequestRepository, library::LibraryRepository},
        model::{
            borrow::CreateBorrowParams,
            library::{LibraryRecord, BORROWED_LIBRARY, SHELF_CAPACITY},
        },
        service::{borrow::BorrowService, library::LibraryService},
    },
};
use chrono::{Duration, Utc};

fn request(book_id: i32, owner_id: i32, requester_id: i32) -> CreateBorrowParams {
    CreateBorrowParams {
        book_id,
        owner_id,
        requester_id,
        requested_until: Utc::now() + Duration::days(14),
    }
}

/// Tests the full borrow flow from request to acceptance.
///
/// Expected: request is accepted and the book lands in the requester's
/// "Borrowed Books" library with the owner as its source
#[tokio::test]
async fn accept_places_book_for_requester() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::user::UserFactory::new(db)
        .full_name("Durga")
        .build()
        .await?;
    let requester = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, owner.id, "Shelf", &[book.id]).await?;
    let service = BorrowService::new(db);

    let pending = service.create(request(book.id, owner.id, requester.id)).await?;
    assert_eq!(pending.status, BorrowStatus::Pending);

    let accepted = service.accept(owner.id, pending.id).await?;
    assert_eq!(accepted.status, BorrowStatus::Accepted);

    let stored = LibraryService::new(db).get_record(requester.id).await?;
    let borrowed = stored.record.library(BORROWED_LIBRARY).unwrap();
    let placement = &borrowed.shelves[0].placements[0];
    assert_eq!(placement.book_id, book.id);
    assert_eq!(placement.source.source_name, "Durga");
    assert_eq!(placement.source.source_type, "borrowed");

    let lent = service.loaned(owner.id).await?;
    assert_eq!(lent.len(), 1);
    assert_eq!(lent[0].requester.id, requester.id);

    Ok(())
}

/// Tests that a request can be answered only once.
///
/// Expected: second answer is Err(AppError::Conflict)
#[tokio::test]
async fn request_is_answered_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let requester = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, owner.id, "Shelf", &[book.id]).await?;
    let service = BorrowService::new(db);

    let pending = service.create(request(book.id, owner.id, requester.id)).await?;
    service.reject(owner.id, pending.id).await?;

    let result = service.accept(owner.id, pending.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(service.borrowed(requester.id).await?.is_empty());

    Ok(())
}

/// Tests answering someone else's request.
///
/// Expected: Err(AuthError::NotRequestOwner)
#[tokio::test]
async fn only_owner_answers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let requester = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, owner.id, "Shelf", &[book.id]).await?;
    let service = BorrowService::new(db);
    let pending = service.create(request(book.id, owner.id, requester.id)).await?;

    let result = service.accept(requester.id, pending.id).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotRequestOwner { .. }))
    ));

    Ok(())
}

/// Tests request validation.
///
/// Expected: self requests and past dates are bad requests, a book the owner lacks
/// is not found, and a duplicate pending request conflicts
#[tokio::test]
async fn create_validates_request() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let requester = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    let other = factory::create_book(db).await?;
    factory::create_library(db, owner.id, "Shelf", &[book.id]).await?;
    let service = BorrowService::new(db);

    let own = service.create(request(book.id, owner.id, owner.id)).await;
    assert!(matches!(own, Err(AppError::BadRequest(_))));

    let mut past = request(book.id, owner.id, requester.id);
    past.requested_until = Utc::now() - Duration::days(1);
    assert!(matches!(service.create(past).await, Err(AppError::BadRequest(_))));

    let missing = service.create(request(other.id, owner.id, requester.id)).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    service.create(request(book.id, owner.id, requester.id)).await?;
    let duplicate = service.create(request(book.id, owner.id, requester.id)).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that a failed placement aborts the acceptance.
///
/// The requester's borrowed shelf holds a book at the largest position, so putting
/// the new book at the front cannot shift it.
///
/// Expected: Err(LibraryError::InvalidPosition), the request still pending and the
/// requester's record unchanged
#[tokio::test]
async fn accept_rolls_back_when_placement_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let requester = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, owner.id, "Shelf", &[book.id]).await?;

    let mut record = LibraryRecord::default();
    record.place(place(501, BORROWED_LIBRARY, 0, 0))?;
    record.place(place(502, BORROWED_LIBRARY, 0, i32::MAX))?;
    LibraryRepository::new(db)
        .save(requester.id, &record, None)
        .await?;

    let service = BorrowService::new(db);
    let pending = service.create(request(book.id, owner.id, requester.id)).await?;

    let result = service.accept(owner.id, pending.id).await;

    assert!(matches!(
        result,
        Err(AppError::LibraryErr(LibraryError::InvalidPosition(0)))
    ));
    let stored = BorrowRequestRepository::new(db)
        .find_by_id(pending.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, BorrowStatus::Pending);
    let after = LibraryService::new(db).get_record(requester.id).await?;
    assert_eq!(after.record, record);
    assert_eq!(after.version, 0);

    Ok(())
}

/// Tests rejecting a request that was accepted after the caller looked at it.
///
/// Expected: Err(AppError::Conflict) and the request stays accepted with the book
/// still placed for the requester
#[tokio::test]
async fn reject_after_accept_keeps_acceptance() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let requester = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, owner.id, "Shelf", &[book.id]).await?;
    let service = BorrowService::new(db);
    let pending = service.create(request(book.id, owner.id, requester.id)).await?;

    let seen = BorrowRequestRepository::new(db)
        .find_by_id(pending.id)
        .await?
        .unwrap();
    assert_eq!(seen.status, BorrowStatus::Pending);

    service.accept(owner.id, pending.id).await?;
    let result = service.reject(owner.id, pending.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    let stored = BorrowRequestRepository::new(db)
        .find_by_id(pending.id)
        .await?
        .unwrap();
    assert_eq!(stored.status, BorrowStatus::Accepted);
    assert_eq!(service.borrowed(requester.id).await?.len(), 1);

    Ok(())
}

/// Tests accepting into a full borrowed shelf.
///
/// Expected: the book lands on a second "Borrowed Books" shelf
#[tokio::test]
async fn accept_opens_new_borrowed_shelf_when_full() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let requester = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, owner.id, "Shelf", &[book.id]).await?;

    let mut record = LibraryRecord::default();
    for i in 0..SHELF_CAPACITY as i32 {
        record.place(place(1000 + i, BORROWED_LIBRARY, 0, i))?;
    }
    LibraryRepository::new(db)
        .save(requester.id, &record, None)
        .await?;

    let service = BorrowService::new(db);
    let pending = service.create(request(book.id, owner.id, requester.id)).await?;
    service.accept(owner.id, pending.id).await?;

    let stored = LibraryService::new(db).get_record(requester.id).await?;
    let borrowed = stored.record.library(BORROWED_LIBRARY).unwrap();
    assert_eq!(borrowed.shelves.len(), 2);
    assert_eq!(borrowed.shelves[0].placements.len(), SHELF_CAPACITY);
    assert_eq!(borrowed.shelves[1].placements[0].book_id, book.id);

    Ok(())
}
