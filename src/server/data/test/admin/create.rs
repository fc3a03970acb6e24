use super::*;

fn params(email: &str) -> RegisterAdminParams {
    RegisterAdminParams {
        full_name: "Rina Das".to_string(),
        email: email.to_string(),
        mobile_number: "01700000000".to_string(),
        password_hash: "hash".to_string(),
    }
}

/// Tests registering an admin.
///
/// New admins start unverified and active, and are found by email in any case.
///
/// Expected: Ok(Admin) with is_verified false
#[tokio::test]
async fn creates_unverified_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::Admin).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = AdminRepository::new(db);

    let admin = repo.create(params("rina@example.com")).await?;

    assert!(!admin.is_verified);
    assert_eq!(admin.verified_by, None);
    assert_eq!(admin.lifecycle, Lifecycle::Active);

    let found = repo.find_by_email("RINA@example.com").await?;
    assert_eq!(found.map(|a| a.id), Some(admin.id));

    Ok(())
}

/// Tests partial profile updates.
///
/// Expected: only the supplied fields change
#[tokio::test]
async fn updates_only_given_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::Admin).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = AdminRepository::new(db);
    let admin = repo.create(params("tapan@example.com")).await?;

    let updated = repo
        .update(
            admin.id,
            UpdateAdminParams {
                full_name: Some("Tapan Sen".to_string()),
                mobile_number: None,
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.full_name, "Tapan Sen");
    assert_eq!(updated.mobile_number, admin.mobile_number);

    let missing = repo
        .update(
            404,
            UpdateAdminParams {
                full_name: None,
                mobile_number: None,
            },
        )
        .await?;
    assert!(missing.is_none());

    Ok(())
}
