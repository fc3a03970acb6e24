use super::*;

/// Tests partial profile updates.
///
/// Expected: only the provided fields change
#[tokio::test]
async fn updates_only_given_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db)
        .full_name("Apu")
        .build()
        .await?;

    let updated = UserRepository::new(db)
        .update(
            user.id,
            UpdateUserParams {
                profile_image: Some("https://img.example.com/apu.png".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.full_name, "Apu");
    assert_eq!(
        updated.profile_image.as_deref(),
        Some("https://img.example.com/apu.png")
    );
    assert_eq!(updated.mobile_number, user.mobile_number);

    Ok(())
}
