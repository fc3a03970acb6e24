use super::*;

/// Tests counting recent additions.
///
/// Expected: books older than the window and deleted books are not counted
#[tokio::test]
async fn counts_recent_active_books() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();

    factory::create_book(db).await?;
    factory::book::BookFactory::new(db)
        .added_at(now - Duration::days(10))
        .build()
        .await?;
    factory::book::BookFactory::new(db)
        .added_at(now - Duration::days(40))
        .build()
        .await?;
    factory::book::BookFactory::new(db).deleted().build().await?;

    let repo = BookRepository::new(db);

    assert_eq!(repo.count_added_since(now - Duration::days(7)).await?, 1);
    assert_eq!(repo.count_added_since(now - Duration::days(30)).await?, 2);
    assert_eq!(repo.count_active().await?, 3);

    Ok(())
}
