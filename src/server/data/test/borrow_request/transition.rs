use super::*;

/// Tests that only pending requests transition.
///
/// Expected: first accept succeeds, a repeated reject returns None
#[tokio::test]
async fn transitions_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let requester = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    let request = factory::create_borrow_request(db, book.id, owner.id, requester.id).await?;
    let repo = BorrowRequestRepository::new(db);

    let accepted = repo
        .transition(request.id, BorrowStatus::Accepted)
        .await?
        .unwrap();
    let again = repo.transition(request.id, BorrowStatus::Rejected).await?;

    assert_eq!(accepted.status, BorrowStatus::Accepted);
    assert!(again.is_none());
    assert_eq!(
        repo.find_by_id(request.id).await?.unwrap().status,
        BorrowStatus::Accepted
    );

    Ok(())
}
