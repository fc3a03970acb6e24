use super::*;

/// Tests the first write and a following versioned write.
///
/// Expected: version 0 after insert and 1 after update
#[tokio::test]
async fn inserts_then_bumps_version() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let repo = LibraryRepository::new(db);

    let mut record = LibraryRecord::default();
    record.place(place(1, "Home")).unwrap();
    let first = repo.save(user.id, &record, None).await?;
    assert_eq!(first.version, 0);

    record.place(place(2, "Travel")).unwrap();
    let second = repo.save(user.id, &record, Some(first.version)).await?;

    assert_eq!(second.version, 1);
    assert_eq!(second.record, record);

    Ok(())
}

/// Tests writing against a stale version.
///
/// Two writers read version 0; the second write is refused and the first one's
/// data is kept.
///
/// Expected: Err(LibraryError::VersionConflict)
#[tokio::test]
async fn rejects_stale_version() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::create_library(db, user.id, "Home", &[1]).await?;
    let repo = LibraryRepository::new(db);

    let stored = repo.find_by_user(user.id).await?.unwrap();
    let mut winner = stored.record.clone();
    winner.place(place(2, "Winner")).unwrap();
    let mut loser = stored.record.clone();
    loser.place(place(3, "Loser")).unwrap();

    repo.save(user.id, &winner, Some(stored.version)).await?;
    let result = repo.save(user.id, &loser, Some(stored.version)).await;

    assert!(matches!(
        result,
        Err(AppError::LibraryErr(LibraryError::VersionConflict(_)))
    ));
    let current = repo.find_by_user(user.id).await?.unwrap();
    assert!(current.record.library("Winner").is_ok());
    assert!(current.record.library("Loser").is_err());

    Ok(())
}
