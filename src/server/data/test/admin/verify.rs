use super::*;

/// Tests verification by a super admin.
///
/// Expected: the admin is verified and records who verified them
#[tokio::test]
async fn records_verifier() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::Admin).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::admin::AdminFactory::new(db)
        .verified(false)
        .build()
        .await?;

    let verified = AdminRepository::new(db)
        .verify(admin.id, 7)
        .await?
        .unwrap();

    assert!(verified.is_verified);
    assert_eq!(verified.verified_by, Some(7));

    Ok(())
}

/// Tests verifying an admin that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::Admin).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = AdminRepository::new(db).verify(404, 1).await?;

    assert!(result.is_none());

    Ok(())
}
