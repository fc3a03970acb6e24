use super::*;

/// Tests listing by party and status.
///
/// Expected: owner and requester views filtered by status
#[tokio::test]
async fn filters_by_party_and_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let requester = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;

    factory::borrow_request::BorrowRequestFactory::new(db, book.id, owner.id, requester.id)
        .status("accepted")
        .build()
        .await?;
    factory::create_borrow_request(db, book.id, owner.id, other.id).await?;
    factory::create_borrow_request(db, book.id, requester.id, owner.id).await?;

    let repo = BorrowRequestRepository::new(db);

    assert_eq!(repo.find_by_owner(owner.id, None).await?.len(), 2);
    assert_eq!(
        repo.find_by_owner(owner.id, Some(BorrowStatus::Accepted))
            .await?
            .len(),
        1
    );
    assert_eq!(repo.find_by_requester(owner.id, None).await?.len(), 1);
    assert_eq!(
        repo.find_by_requester(requester.id, Some(BorrowStatus::Pending))
            .await?
            .len(),
        0
    );

    assert_eq!(repo.delete_for_users(&[other.id]).await?, 1);
    assert_eq!(repo.find_by_owner(owner.id, None).await?.len(), 1);

    Ok(())
}
