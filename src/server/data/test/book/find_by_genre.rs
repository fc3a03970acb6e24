use super::*;

/// Tests genre and author lookups.
///
/// Substring matches from the database are narrowed to exact, case-insensitive
/// entries, and deleted books are skipped.
///
/// Expected: only the exact matches
#[tokio::test]
async fn matches_whole_genre_and_author() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let fiction = factory::book::BookFactory::new(db)
        .genres(["Fiction"])
        .authors(["Tagore"])
        .build()
        .await?;
    factory::book::BookFactory::new(db)
        .genres(["Science Fiction"])
        .authors(["Tagore Jr"])
        .build()
        .await?;
    factory::book::BookFactory::new(db)
        .genres(["Fiction"])
        .authors(["Tagore"])
        .deleted()
        .build()
        .await?;

    let repo = BookRepository::new(db);
    let by_genre = repo.find_by_genre("fiction").await?;
    let by_author = repo.find_by_author("Tagore").await?;

    assert_eq!(by_genre.iter().map(|b| b.id).collect::<Vec<_>>(), vec![fiction.id]);
    assert_eq!(by_author.iter().map(|b| b.id).collect::<Vec<_>>(), vec![fiction.id]);

    Ok(())
}
