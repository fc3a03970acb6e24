use super::*;

/// Tests selecting readers for purging.
///
/// Only readers deleted before the cutoff qualify; recently deleted and
/// deactivated readers are kept.
///
/// Expected: Ok(vec![old.id])
#[tokio::test]
async fn returns_only_old_deletions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();

    let old = factory::user::UserFactory::new(db)
        .deleted_at(now - Duration::days(20))
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .deleted_at(now - Duration::days(2))
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .deactivated_at(now - Duration::days(40))
        .build()
        .await?;
    factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let ids = repo.find_deleted_before(now - Duration::days(15)).await?;

    assert_eq!(ids, vec![old.id]);
    assert_eq!(repo.delete_many(&ids).await?, 1);
    assert!(repo.find_by_id(old.id).await?.is_none());

    Ok(())
}
