use super::*;

/// Tests reading a record seeded as raw JSON.
///
/// Expected: the record decodes with its books in position order at version 0
#[tokio::test]
async fn decodes_stored_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_library(db, user.id, "Home", &[11, 12, 13]).await?;

    let stored = LibraryRepository::new(db)
        .find_by_user(user.id)
        .await?
        .unwrap();

    assert_eq!(stored.version, 0);
    assert_eq!(stored.record.library("Home").unwrap().book_ids(), vec![11, 12, 13]);

    Ok(())
}

/// Tests reading a reader without a record.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    assert!(LibraryRepository::new(db).find_by_user(user.id).await?.is_none());

    Ok(())
}
