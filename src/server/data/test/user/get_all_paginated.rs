use super::*;

/// Tests paginating readers.
///
/// Deleted readers are excluded from both the page and the total.
///
/// Expected: Ok((2 users, total 3)) on the first page of two
#[tokio::test]
async fn paginates_non_deleted_readers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::create_user(db).await?;
    }
    factory::user::UserFactory::new(db)
        .deleted_at(Utc::now())
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let (first, total) = repo.get_all_paginated(0, 2).await?;
    let (second, _) = repo.get_all_paginated(1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
    assert!(first[0].id < first[1].id);
    assert_eq!(repo.count_not_deleted().await?, 3);

    Ok(())
}
