use super::*;
use crate::{
    model::library::{Consent, ReadingStatus},
    server::{model::library::PlaceOutcome, service::library::LibraryService},
};

/// Tests placing a book for a reader without a record.
///
/// Expected: record and library are created, the book sits on the first shelf
#[tokio::test]
async fn place_creates_record_and_library() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;

    let (stored, outcome) = LibraryService::new(db)
        .place(reader.id, place(book.id, "Favourites", 0, 3))
        .await?;

    assert_eq!(outcome, PlaceOutcome::Inserted);
    let library = stored.record.library("Favourites").unwrap();
    assert_eq!(library.shelves.len(), 1);
    assert_eq!(library.shelves[0].placements[0].position, 3);

    Ok(())
}

/// Tests placing a deleted catalog book.
///
/// Expected: Err(AppError::NotFound) and no record is written
#[tokio::test]
async fn place_rejects_deleted_book() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = factory::create_user(db).await?;
    let book = factory::book::BookFactory::new(db).deleted().build().await?;
    let service = LibraryService::new(db);

    let result = service.place(reader.id, place(book.id, "Favourites", 0, 0)).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(matches!(
        service.get_record(reader.id).await,
        Err(AppError::LibraryErr(LibraryError::RecordNotFound(_)))
    ));

    Ok(())
}

/// Tests that a full shelf refuses an eleventh book and the record is unchanged.
///
/// Expected: Err(LibraryError::ShelfFull) and version unchanged
#[tokio::test]
async fn place_refuses_full_shelf() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = factory::create_user(db).await?;
    let mut ids = Vec::new();
    for _ in 0..11 {
        ids.push(factory::create_book(db).await?.id);
    }
    factory::create_library(db, reader.id, "Favourites", &ids[..10]).await?;
    let service = LibraryService::new(db);
    let before = service.get_record(reader.id).await?;

    let result = service
        .place(reader.id, place(ids[10], "Favourites", 0, 10))
        .await;

    assert!(matches!(
        result,
        Err(AppError::LibraryErr(LibraryError::ShelfFull(_)))
    ));
    assert_eq!(service.get_record(reader.id).await?.version, before.version);

    Ok(())
}

/// Tests that reaching full progress completes the book.
///
/// Expected: progress 100 and status completed
#[tokio::test]
async fn full_progress_completes_book() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, reader.id, "Favourites", &[book.id]).await?;
    let service = LibraryService::new(db);

    let placement = service.update_progress(reader.id, book.id, 100).await?;
    assert_eq!(placement.read_progress, 100);
    assert_eq!(placement.status, ReadingStatus::Completed);

    let result = service.update_progress(reader.id, book.id, 101).await;
    assert!(matches!(
        result,
        Err(AppError::LibraryErr(LibraryError::InvalidProgress(101)))
    ));

    Ok(())
}

/// Tests conditional deletion of a library holding a book found nowhere else.
///
/// Expected: ConsentRequired listing the book, then deletion with unconditional consent
#[tokio::test]
async fn delete_library_requires_consent_for_orphans() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, reader.id, "Favourites", &[book.id]).await?;
    let service = LibraryService::new(db);

    let result = service
        .delete_library(reader.id, "Favourites", Consent::Conditional)
        .await;
    match result {
        Err(AppError::LibraryErr(LibraryError::ConsentRequired { orphaned, .. })) => {
            assert_eq!(orphaned, vec![book.id]);
        }
        other => panic!("expected ConsentRequired, got {:?}", other),
    }

    let stored = service
        .delete_library(reader.id, "Favourites", Consent::Unconditional)
        .await?;
    assert!(stored.record.libraries.is_empty());

    Ok(())
}

/// Tests moving books between libraries.
///
/// Expected: the moved id is returned and the book now lives in the target only
#[tokio::test]
async fn move_books_between_libraries() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, reader.id, "Favourites", &[book.id]).await?;
    let service = LibraryService::new(db);
    service.create_library(reader.id, "Classics").await?;

    let moved = service
        .move_books(reader.id, "Favourites", "Classics", &[book.id])
        .await?;

    assert_eq!(moved, vec![book.id]);
    let stored = service.get_record(reader.id).await?;
    assert!(!stored.record.library("Favourites").unwrap().contains(book.id));
    assert!(stored.record.library("Classics").unwrap().contains(book.id));

    Ok(())
}

/// Tests recoloring and querying by color.
///
/// Expected: the recolored placement is found by its new color only
#[tokio::test]
async fn recolor_then_find_by_color() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, reader.id, "Favourites", &[book.id]).await?;
    let service = LibraryService::new(db);

    service.recolor(reader.id, book.id, "red").await?;

    let red = service.by_color(reader.id, "red").await?;
    assert_eq!(red.len(), 1);
    assert_eq!(red[0].placement.book_id, book.id);
    assert!(service.by_color(reader.id, "blue").await?.is_empty());

    Ok(())
}
