use super::*;

/// Tests an active reader calling a self-service endpoint.
///
/// Expected: Ok(Principal::User) for the token's id
#[tokio::test]
async fn resolves_reader_principal() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let reader = factory::create_user(db).await?;
    let token = tokens.issue(reader.id, Role::User)?;

    let principal = AuthGuard::new(db, &tokens)
        .require(Some(&token), &[Action::ManageOwnLibrary])
        .await?;

    assert!(matches!(&principal, Principal::User(u) if u.id == reader.id));
    assert_eq!(principal.actor(), format!("user:{}", reader.id));

    Ok(())
}

/// Tests a request without a token.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let result = AuthGuard::new(db, &tokens).require(None, &[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));

    Ok(())
}

/// Tests a reader calling an admin endpoint.
///
/// Expected: Err(AuthError::AccessDenied) naming the action
#[tokio::test]
async fn denies_reader_admin_action() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let reader = factory::create_user(db).await?;
    let token = tokens.issue(reader.id, Role::User)?;

    let result = AuthGuard::new(db, &tokens)
        .require(Some(&token), &[Action::GetBooks, Action::ManageBooks])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied { action, .. })) => {
            assert_eq!(action, "ManageBooks");
        }
        other => panic!("expected AccessDenied, got {:?}", other),
    }

    Ok(())
}

/// Tests a deactivated reader with a still valid token.
///
/// Expected: Err(AuthError::AccountInactive)
#[tokio::test]
async fn rejects_deactivated_reader() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let reader = factory::user::UserFactory::new(db)
        .deactivated_at(chrono::Utc::now())
        .build()
        .await?;
    let token = tokens.issue(reader.id, Role::User)?;

    let result = AuthGuard::new(db, &tokens).require(Some(&token), &[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive { .. }))
    ));

    Ok(())
}

/// Tests an admin that has not been verified yet.
///
/// Expected: Err(AuthError::AdminNotVerified)
#[tokio::test]
async fn rejects_unverified_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let admin = factory::admin::AdminFactory::new(db)
        .verified(false)
        .build()
        .await?;
    let token = tokens.issue(admin.id, Role::Admin)?;

    let result = AuthGuard::new(db, &tokens)
        .require(Some(&token), &[Action::GetUsers])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AdminNotVerified(_)))
    ));

    Ok(())
}

/// Tests a token whose account no longer exists.
///
/// Expected: Err(AuthError::PrincipalNotFound)
#[tokio::test]
async fn rejects_unknown_principal() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let token = tokens.issue(999, Role::SuperAdmin)?;

    let result = AuthGuard::new(db, &tokens).require(Some(&token), &[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::PrincipalNotFound { .. }))
    ));

    Ok(())
}

/// Tests a super admin on a reader-only endpoint.
///
/// Expected: permitted by the matrix but Err(AuthError::ReaderAccountRequired)
#[tokio::test]
async fn super_admin_has_no_reader_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let super_admin = factory::create_super_admin(db).await?;
    let token = tokens.issue(super_admin.id, Role::SuperAdmin)?;

    let result = AuthGuard::new(db, &tokens)
        .require_reader(Some(&token), &[Action::ManageOwnLibrary])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::ReaderAccountRequired(Role::SuperAdmin)))
    ));

    Ok(())
}
