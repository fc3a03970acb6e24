use super::*;

use crate::model::auth::SocialProviderKind;

fn params(email: &str) -> CreateUserParams {
    CreateUserParams {
        full_name: "Apu Roy".to_string(),
        email: email.to_string(),
        mobile_number: Some("0123456789".to_string()),
        password_hash: Some("hash".to_string()),
        user_type: "reader".to_string(),
        profile_image: None,
        social_providers: Vec::new(),
        is_verified: false,
    }
}

/// Tests creating a reader.
///
/// Verifies the new account starts active with the given fields and can be found
/// again by email in any letter case.
///
/// Expected: Ok(User) with Lifecycle::Active
#[tokio::test]
async fn creates_active_reader() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = UserRepository::new(db);

    let user = repo.create(params("apu@example.com")).await?;

    assert_eq!(user.full_name, "Apu Roy");
    assert_eq!(user.lifecycle, Lifecycle::Active);
    assert!(!user.is_verified);

    let found = repo.find_by_email("APU@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests storing social provider links.
///
/// Expected: providers survive the JSON column round trip
#[tokio::test]
async fn stores_social_providers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = UserRepository::new(db);

    let mut p = params("durga@example.com");
    p.password_hash = None;
    p.social_providers = vec![SocialProvider {
        id: "g-1".to_string(),
        provider: SocialProviderKind::Google,
        email: "durga@example.com".to_string(),
    }];

    let user = repo.create(p).await?;

    assert!(user.has_provider(SocialProviderKind::Google, "DURGA@example.com"));
    assert!(!user.has_provider(SocialProviderKind::Facebook, "durga@example.com"));

    Ok(())
}

/// Tests the unique email constraint.
///
/// Expected: Err(AppError::DbErr)
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = UserRepository::new(db);

    repo.create(params("apu@example.com")).await?;
    let mut again = params("apu@example.com");
    again.mobile_number = Some("9999999999".to_string());

    let result = repo.create(again).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}
