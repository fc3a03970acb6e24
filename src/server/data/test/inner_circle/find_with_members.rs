use super::*;

/// Tests loading a circle with its member entries.
///
/// Expected: the creator is the only admin and the second entry is a plain member
#[tokio::test]
async fn loads_members_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_circle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (creator, circle) = helpers::create_circle_with_creator(db).await?;
    let member = helpers::create_circle_member(db, &circle).await?;

    let loaded = InnerCircleRepository::new(db)
        .find_with_members(circle.id)
        .await?
        .unwrap();

    assert_eq!(loaded.members.len(), 2);
    assert_eq!(loaded.members[0].user_id, creator.id);
    assert!(loaded.is_admin(creator.id));
    assert!(!loaded.is_admin(member.id));
    assert!(loaded.is_active_member(member.id));
    assert_eq!(loaded.admin_count(), 1);

    Ok(())
}

/// Tests loading a missing circle.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_circle() -> Result<(), AppError> {
    let test = TestBuilder::new().with_circle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(InnerCircleRepository::new(db)
        .find_with_members(77)
        .await?
        .is_none());

    Ok(())
}
