use super::*;

/// Tests deleting a circle with members.
///
/// Expected: the circle and every member entry are gone
#[tokio::test]
async fn deletes_circle_and_members() -> Result<(), AppError> {
    let test = TestBuilder::new().with_circle_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, circle) = helpers::create_circle_with_creator(db).await?;
    helpers::create_circle_member(db, &circle).await?;
    let repo = InnerCircleRepository::new(db);

    assert!(repo.delete(circle.id).await?);
    assert!(repo.find_with_members(circle.id).await?.is_none());
    assert!(!repo.delete(circle.id).await?);

    Ok(())
}
