use super::*;

/// Tests inserting a book with several ISBNs.
///
/// Expected: the book is found by either ISBN with ISBNs in insertion order
#[tokio::test]
async fn creates_book_with_isbns() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let txn = db.begin().await?;
    let book = BookRepository::new(&txn)
        .create(volume("Pather Panchali", &["9780253201935", "0253201934"]))
        .await?;
    txn.commit().await?;

    assert_eq!(book.isbns, vec!["9780253201935", "0253201934"]);

    let repo = BookRepository::new(db);
    let found = repo.find_active_by_isbn("0253201934").await?.unwrap();
    assert_eq!(found.id, book.id);
    assert_eq!(found.authors, vec!["Bibhutibhushan Bandyopadhyay"]);

    Ok(())
}

/// Tests that soft deleted books are hidden from ISBN lookups.
///
/// Expected: Ok(None) from find_active_by_isbn but the id still resolves
#[tokio::test]
async fn hides_deleted_books_from_isbn_lookup() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let book = factory::book::BookFactory::new(db)
        .isbn("9780000000001")
        .deleted()
        .build()
        .await?;

    let repo = BookRepository::new(db);

    assert!(repo.find_active_by_isbn("9780000000001").await?.is_none());
    assert_eq!(
        repo.find_id_by_any_isbn(&["9780000000001".to_string()]).await?,
        Some(book.id)
    );

    Ok(())
}
