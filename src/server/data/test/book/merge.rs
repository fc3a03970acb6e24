use super::*;

/// Tests re-importing a known book.
///
/// Fields are overwritten and new ISBNs are added without duplicating known ones.
///
/// Expected: one book carrying all three ISBNs
#[tokio::test]
async fn merges_fields_and_new_isbns() -> Result<(), AppError> {
    let test = TestBuilder::new().with_catalog_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let existing = factory::book::BookFactory::new(db)
        .title("Old title")
        .isbn("111")
        .isbn("222")
        .build()
        .await?;

    let repo = BookRepository::new(db);
    let merged = repo
        .merge(existing.id, volume("Aparajito", &["222", "333"]))
        .await?
        .unwrap();

    assert_eq!(merged.id, existing.id);
    assert_eq!(merged.title, "Aparajito");
    assert_eq!(merged.isbns, vec!["111", "222", "333"]);
    assert_eq!(repo.count_active().await?, 1);

    Ok(())
}
