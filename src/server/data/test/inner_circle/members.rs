use super::*;

/// Tests member entry transitions.
///
/// A member is promoted, soft removed, then reset to a pending invitation.
///
/// Expected: each update is reflected in the stored entry
#[tokio::test]
async fn updates_member_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_circle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (creator, circle) = helpers::create_circle_with_creator(db).await?;
    let member = helpers::create_circle_member(db, &circle).await?;
    let repo = InnerCircleRepository::new(db);

    let promoted = repo
        .set_role(circle.id, member.id, CircleRole::IcAdmin)
        .await?
        .unwrap();
    assert!(promoted.is_admin());

    let removed = repo
        .mark_removed(circle.id, member.id, Utc::now())
        .await?
        .unwrap();
    assert!(removed.is_removed);
    assert!(!removed.is_active_member());

    let reset = repo
        .reset_to_pending(circle.id, member.id, creator.id)
        .await?
        .unwrap();
    assert_eq!(reset.invite_status, InviteStatus::Pending);
    assert_eq!(reset.role, CircleRole::Member);
    assert!(!reset.is_removed);
    assert_eq!(reset.removed_at, None);

    Ok(())
}

/// Tests updating an entry that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_entry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_circle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, circle) = helpers::create_circle_with_creator(db).await?;
    let outsider = factory::create_user(db).await?;

    let result = InnerCircleRepository::new(db)
        .set_invite_status(circle.id, outsider.id, InviteStatus::Accept)
        .await?;

    assert!(result.is_none());

    Ok(())
}
