use super::*;
use crate::server::{model::analytics::OTHERS_BUCKET, service::analytics::AnalyticsService};

/// Tests the most placed ranking with a random backfill.
///
/// Book A is placed by two readers, book B by one, and C is never placed.
///
/// Expected: A then B ranked by count, C appended with zero placements
#[tokio::test]
async fn most_placed_ranks_and_backfills() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let a = factory::create_book(db).await?;
    let b = factory::create_book(db).await?;
    let c = factory::create_book(db).await?;
    factory::create_library(db, first.id, "Shelf", &[a.id, b.id]).await?;
    factory::create_library(db, second.id, "Shelf", &[a.id]).await?;

    let ranking = AnalyticsService::new(db).most_placed(3).await?;

    let ids: Vec<(i32, u64)> = ranking.iter().map(|m| (m.book.id, m.placements)).collect();
    assert_eq!(ids, vec![(a.id, 2), (b.id, 1), (c.id, 0)]);

    Ok(())
}

/// Tests the reader breakdown against genre categories.
///
/// Expected: one owned placement, counted under Fiction via a case-insensitive
/// genre match
#[tokio::test]
async fn reading_breakdown_uses_genre_categories() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let reader = factory::create_user(db).await?;
    factory::genre::GenreFactory::new(db)
        .name("Fiction")
        .category("Fiction")
        .build()
        .await?;
    let book = factory::book::BookFactory::new(db)
        .genres(["fiction"])
        .build()
        .await?;
    factory::create_library(db, reader.id, "Shelf", &[book.id]).await?;

    let breakdown = AnalyticsService::new(db)
        .reading_breakdown(reader.id)
        .await?
        .into_dto();

    assert_eq!(breakdown.by_source_type[0].label, "owned");
    assert_eq!(breakdown.by_source_type[0].count, 1);
    assert_eq!(breakdown.fiction_percentage, 100.0);
    assert_eq!(breakdown.academic_percentage, 0.0);

    Ok(())
}

/// Tests the catalog summary counts.
///
/// Expected: deleted books and readers are excluded
#[tokio::test]
async fn summary_excludes_deleted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_book(db).await?;
    factory::book::BookFactory::new(db).deleted().build().await?;
    factory::create_user(db).await?;
    factory::user::UserFactory::new(db)
        .deleted_at(chrono::Utc::now())
        .build()
        .await?;

    let summary = AnalyticsService::new(db).summary().await?;

    assert_eq!(summary.total_books, 1);
    assert_eq!(summary.total_users, 1);
    assert_eq!(summary.added_last_7_days, 1);

    Ok(())
}

/// Tests the genre distribution against the genre catalog.
///
/// Expected: the catalogued genre by name, the uncatalogued one under Others
#[tokio::test]
async fn genre_distribution_buckets_uncatalogued_genres() -> Result<(), AppError> {
    let test = TestBuilder::new().with_library_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::genre::GenreFactory::new(db).name("Fiction").build().await?;
    factory::book::BookFactory::new(db)
        .genres(["fiction"])
        .build()
        .await?;
    factory::book::BookFactory::new(db)
        .genres(["Klingon Poetry"])
        .build()
        .await?;

    let shares = AnalyticsService::new(db).genre_distribution().await?;

    let names: Vec<&str> = shares.iter().map(|s| s.genre.as_str()).collect();
    assert_eq!(names, vec!["Fiction", OTHERS_BUCKET]);
    assert_eq!(shares[1].percentage, 50.0);

    Ok(())
}
