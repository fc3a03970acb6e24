use super::*;
use crate::server::{
    data::{
        inner_circle::InnerCircleRepository, library::LibraryRepository, user::UserRepository,
        user_circle::UserCircleRepository,
    },
    service::purge::PurgeService,
};
use chrono::{Duration, Utc};
use test_utils::factory::helpers;

/// Tests purging readers deleted before the retention window.
///
/// One reader was deleted 30 days ago, another 2 days ago, with a 15 day window.
///
/// Expected: only the first reader and their library record are removed
#[tokio::test]
async fn purges_only_expired_readers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();
    let expired = factory::user::UserFactory::new(db)
        .deleted_at(now - Duration::days(30))
        .build()
        .await?;
    let recent = factory::user::UserFactory::new(db)
        .deleted_at(now - Duration::days(2))
        .build()
        .await?;
    let book = factory::create_book(db).await?;
    factory::create_library(db, expired.id, "Shelf", &[book.id]).await?;
    let (_, circle) = helpers::create_circle_with_creator(db).await?;
    factory::inner_circle::MemberFactory::new(db, circle.id, expired.id)
        .build()
        .await?;

    let report = PurgeService::new(db).purge_deleted_users(now, 15).await?;

    assert_eq!(report.users, 1);
    assert_eq!(report.library_records, 1);
    assert_eq!(report.circle_entries, 1);
    assert_eq!(report.circle_links, 1);
    let users = UserRepository::new(db);
    assert!(users.find_by_id(expired.id).await?.is_none());
    assert!(users.find_by_id(recent.id).await?.is_some());
    assert!(LibraryRepository::new(db)
        .find_by_user(expired.id)
        .await?
        .is_none());

    Ok(())
}

/// Tests a run with nobody due.
///
/// Expected: an all-zero report
#[tokio::test]
async fn empty_purge_reports_zero() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_user(db).await?;

    let report = PurgeService::new(db)
        .purge_deleted_users(Utc::now(), 15)
        .await?;

    assert_eq!(report, Default::default());

    Ok(())
}

/// Tests purging a reader who created a circle.
///
/// Expected: the circle goes with them, along with the other member's entry and link
#[tokio::test]
async fn purges_circles_created_by_expired_readers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();
    let creator = factory::user::UserFactory::new(db)
        .deleted_at(now - Duration::days(30))
        .build()
        .await?;
    let circle = factory::create_circle(db, creator.id).await?;
    let member = helpers::create_circle_member(db, &circle).await?;
    let (_, kept) = helpers::create_circle_with_creator(db).await?;

    let report = PurgeService::new(db).purge_deleted_users(now, 15).await?;

    assert_eq!(report.users, 1);
    assert_eq!(report.circles, 1);
    let circles = InnerCircleRepository::new(db);
    assert!(circles.find_by_id(circle.id).await?.is_none());
    assert!(circles.find_by_id(kept.id).await?.is_some());
    let memberships = UserCircleRepository::new(db).memberships(member.id).await?;
    assert!(!memberships.inner_circle.contains(&circle.id));

    Ok(())
}
