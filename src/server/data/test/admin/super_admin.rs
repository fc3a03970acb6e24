use super::*;

/// Tests the first-time setup check.
///
/// Expected: false on an empty table, true once a super admin is registered
#[tokio::test]
async fn exists_after_first_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::SuperAdmin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = SuperAdminRepository::new(db);

    assert!(!repo.exists().await?);

    let created = repo
        .create(RegisterAdminParams {
            full_name: "Owner".to_string(),
            email: "owner@example.com".to_string(),
            mobile_number: "01800000000".to_string(),
            password_hash: "hash".to_string(),
        })
        .await?;

    assert!(repo.exists().await?);
    let found = repo.find_by_email("Owner@Example.com").await?;
    assert_eq!(found.map(|s| s.id), Some(created.id));

    Ok(())
}
