use super::*;

/// Tests listing admins.
///
/// Soft deleted admins are hidden; deactivated ones are still listed.
///
/// Expected: Ok(vec) of the active and deactivated admins in id order
#[tokio::test]
async fn hides_deleted_admins() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(entity::prelude::Admin).build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let first = factory::create_admin(db).await?;
    let second = factory::create_admin(db).await?;
    factory::admin::AdminFactory::new(db)
        .deleted_at(Utc::now() - Duration::days(1))
        .build()
        .await?;

    let repo = AdminRepository::new(db);
    repo.set_lifecycle(
        second.id,
        Lifecycle::Deactivated {
            at: Utc::now(),
            by: "superadmin:1".to_string(),
        },
    )
    .await?;

    let admins = repo.get_all().await?;
    let ids: Vec<_> = admins.iter().map(|a| a.id).collect();

    assert_eq!(ids, vec![first.id, second.id]);
    assert!(!admins[1].lifecycle.is_active());

    Ok(())
}
