use super::*;

/// Tests soft deleting and reactivating a reader.
///
/// Expected: the lifecycle columns follow each transition
#[tokio::test]
async fn records_transitions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);
    let at = Utc::now();

    let deleted = repo
        .set_lifecycle(
            user.id,
            Lifecycle::Deleted {
                at,
                by: format!("user:{}", user.id),
            },
        )
        .await?
        .unwrap();

    assert!(deleted.lifecycle.is_deleted());
    assert_eq!(deleted.lifecycle.by(), Some(format!("user:{}", user.id).as_str()));

    let active = repo.set_lifecycle(user.id, Lifecycle::Active).await?.unwrap();
    assert!(active.lifecycle.is_active());
    assert_eq!(active.lifecycle.at(), None);

    Ok(())
}

/// Tests transitions on a missing reader.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_reader() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .set_lifecycle(404, Lifecycle::Active)
        .await?;

    assert!(result.is_none());

    Ok(())
}
