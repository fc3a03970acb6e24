use super::*;

/// Tests opening a request and detecting duplicates.
///
/// Expected: pending status and pending_exists true for the same triple only
#[tokio::test]
async fn creates_pending_request() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = factory::create_user(db).await?;
    let requester = factory::create_user(db).await?;
    let book = factory::create_book(db).await?;
    let repo = BorrowRequestRepository::new(db);

    let request = repo
        .create(CreateBorrowParams {
            book_id: book.id,
            owner_id: owner.id,
            requester_id: requester.id,
            requested_until: Utc::now() + Duration::days(7),
        })
        .await?;

    assert_eq!(request.status, BorrowStatus::Pending);
    assert!(repo.pending_exists(book.id, owner.id, requester.id).await?);
    assert!(!repo.pending_exists(book.id, requester.id, owner.id).await?);

    Ok(())
}
