use super::*;

/// Tests grouping links into joined and invited circles.
///
/// Expected: accepted entries in inner_circle, pending ones in invites
#[tokio::test]
async fn groups_links_by_kind() -> Result<(), AppError> {
    let test = TestBuilder::new().with_circle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (creator, joined) = helpers::create_circle_with_creator(db).await?;
    let (_, invited) = helpers::create_circle_with_creator(db).await?;
    factory::inner_circle::MemberFactory::new(db, invited.id, creator.id)
        .invite_status("Pending")
        .build()
        .await?;

    let repo = UserCircleRepository::new(db);
    let memberships = repo.memberships(creator.id).await?;

    assert_eq!(memberships.inner_circle, vec![joined.id]);
    assert_eq!(memberships.invites, vec![invited.id]);
    assert!(repo.exists(creator.id, invited.id, LinkKind::Invite).await?);

    Ok(())
}

/// Tests bulk loading and removing links for a circle.
///
/// Expected: every reader loses the circle after delete_for_circle
#[tokio::test]
async fn pulls_circle_from_every_reader() -> Result<(), AppError> {
    let test = TestBuilder::new().with_circle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (creator, circle) = helpers::create_circle_with_creator(db).await?;
    let member = helpers::create_circle_member(db, &circle).await?;
    let repo = UserCircleRepository::new(db);

    let before = repo.memberships_for_many(&[creator.id, member.id]).await?;
    assert_eq!(before[&creator.id].inner_circle, vec![circle.id]);
    assert_eq!(before[&member.id].inner_circle, vec![circle.id]);

    assert_eq!(repo.delete_for_circle(circle.id).await?, 2);

    let after = repo.memberships_for_many(&[creator.id, member.id]).await?;
    assert!(after.is_empty());

    Ok(())
}
