use super::*;

/// Tests free text search over titles and authors.
///
/// Expected: matches on title or author, case-insensitively
#[tokio::test]
async fn searches_title_and_author() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let by_title = factory::book::BookFactory::new(db)
        .title("Pather Panchali")
        .authors(["Someone"])
        .build()
        .await?;
    let by_author = factory::book::BookFactory::new(db)
        .title("Aranyak")
        .authors(["Panchanan Ghosh"])
        .build()
        .await?;
    factory::book::BookFactory::new(db)
        .title("Gitanjali")
        .authors(["Tagore"])
        .build()
        .await?;

    let found = BookRepository::new(db).search("panchal").await?;
    let ids: Vec<i32> = found.iter().map(|b| b.id).collect();

    assert_eq!(ids.len(), 1);
    assert!(ids.contains(&by_title.id));

    let found = BookRepository::new(db).search("PANCHA").await?;
    assert_eq!(found.len(), 2);
    assert!(found.iter().any(|b| b.id == by_author.id));

    Ok(())
}
