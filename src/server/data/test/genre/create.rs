use super::*;

/// Tests creating a genre and finding it by name.
///
/// Expected: Ok(Genre) carrying the requested category
#[tokio::test]
async fn creates_and_finds_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::Genre).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = GenreRepository::new(db);

    let genre = repo
        .create("History".to_string(), GenreCategory::NonFiction)
        .await?;

    assert_eq!(genre.category, GenreCategory::NonFiction);

    let found = repo.find_by_name("History").await?;
    assert_eq!(found.map(|g| g.id), Some(genre.id));
    assert!(repo.find_by_name("Poetry").await?.is_none());

    Ok(())
}

/// Tests listing genres.
///
/// Expected: Ok(vec) sorted by name
#[tokio::test]
async fn lists_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::Genre).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::genre::GenreFactory::new(db).name("Thriller").build().await?;
    factory::genre::GenreFactory::new(db).name("Biography").build().await?;
    factory::genre::GenreFactory::new(db).name("Mystery").build().await?;

    let repo = GenreRepository::new(db);
    let names: Vec<_> = repo.get_all().await?.into_iter().map(|g| g.name).collect();

    assert_eq!(names, vec!["Biography", "Mystery", "Thriller"]);
    assert_eq!(repo.count().await?, 3);

    Ok(())
}
