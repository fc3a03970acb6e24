use super::*;

/// Tests registration conflict detection.
///
/// Expected: true for a known email or mobile, false otherwise
#[tokio::test]
async fn detects_email_or_mobile() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let existing = factory::user::UserFactory::new(db)
        .email("apu@example.com")
        .mobile_number(Some("0123456789".to_string()))
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(repo.email_or_mobile_taken("Apu@Example.com", None).await?);
    assert!(
        repo.email_or_mobile_taken("other@example.com", existing.mobile_number.as_deref())
            .await?
    );
    assert!(
        !repo
            .email_or_mobile_taken("other@example.com", Some("5555555555"))
            .await?
    );

    Ok(())
}
