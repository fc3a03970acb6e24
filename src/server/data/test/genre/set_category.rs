use super::*;

/// Tests moving a genre to another category.
///
/// Expected: Ok(Some(Genre)) with the new category
#[tokio::test]
async fn moves_genre() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::Genre).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let genre = factory::create_genre(db).await?;
    let repo = GenreRepository::new(db);

    let moved = repo
        .set_category(genre.id, GenreCategory::Leisure)
        .await?
        .unwrap();

    assert_eq!(moved.category, GenreCategory::Leisure);

    Ok(())
}

/// Tests deleting genres.
///
/// Expected: true for an existing genre, false when nothing matched
#[tokio::test]
async fn deletes_genre() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::Genre).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let genre = factory::create_genre(db).await?;
    let repo = GenreRepository::new(db);

    assert!(repo.delete(genre.id).await?);
    assert!(!repo.delete(genre.id).await?);
    assert!(repo.find_by_id(genre.id).await?.is_none());

    Ok(())
}
