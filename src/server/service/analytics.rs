//! Read-only rollups over the catalog and readers' libraries.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use sea_orm::DatabaseConnection;

use crate::{
    model::genre::GenreCategory,
    server::{
        data::{
            book::BookRepository, genre::GenreRepository, library::LibraryRepository,
            user::UserRepository,
        },
        error::AppError,
        model::{
            analytics::{
                genre_distribution, rank_placements, reading_breakdown, CatalogSummary,
                GenreShare, MostPlaced, PlacedBook, ReadingBreakdown,
            },
            book::Book,
        },
    },
};

pub struct AnalyticsService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Catalog and reader totals with recent additions.
    pub async fn summary(&self) -> Result<CatalogSummary, AppError> {
        let books = BookRepository::new(self.db);
        let now = Utc::now();

        Ok(CatalogSummary {
            total_books: books.count_active().await?,
            total_users: UserRepository::new(self.db).count_not_deleted().await?,
            total_genres: GenreRepository::new(self.db).count().await?,
            added_last_7_days: books.count_added_since(now - Duration::days(7)).await?,
            added_last_30_days: books.count_added_since(now - Duration::days(30)).await?,
        })
    }

    /// Share of each catalogued genre across active books, uncatalogued ones as Others.
    pub async fn genre_distribution(&self) -> Result<Vec<GenreShare>, AppError> {
        let books = BookRepository::new(self.db).get_all_active().await?;
        let known: HashMap<String, String> = GenreRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(|g| (g.name.to_lowercase(), g.name))
            .collect();

        Ok(genre_distribution(
            books.iter().flat_map(|b| b.genres.iter().map(String::as_str)),
            &known,
        ))
    }

    /// Books placed most often across every reader, topped up with random active books.
    ///
    /// # Arguments
    /// - `limit` - Number of entries wanted
    ///
    /// # Returns
    /// - `Ok(Vec<MostPlaced>)` - Up to `limit` entries, ranked books first; backfilled
    ///   entries carry zero placements. Fewer only when the catalog is smaller than `limit`
    pub async fn most_placed(&self, limit: usize) -> Result<Vec<MostPlaced>, AppError> {
        let records = LibraryRepository::new(self.db).get_all().await?;
        let books = BookRepository::new(self.db).get_all_active().await?;
        let active: HashMap<i32, &Book> = books.iter().map(|b| (b.id, b)).collect();

        let ranked = rank_placements(
            records
                .iter()
                .flat_map(|stored| stored.record.placed_book_ids())
                .filter(|id| active.contains_key(id)),
            limit,
        );

        let mut most_placed: Vec<MostPlaced> = ranked
            .into_iter()
            .filter_map(|(id, placements)| {
                let book = (*active.get(&id)?).clone();
                Some(MostPlaced { book, placements })
            })
            .collect();

        let missing = limit.saturating_sub(most_placed.len());
        if missing > 0 {
            let taken: HashSet<i32> = most_placed.iter().map(|m| m.book.id).collect();
            let backfill = random_picks(
                books.iter().filter(|b| !taken.contains(&b.id)).collect(),
                missing,
            );
            most_placed.extend(backfill.into_iter().map(|book| MostPlaced {
                book: book.clone(),
                placements: 0,
            }));
        }

        Ok(most_placed)
    }

    /// The reader's placements by source type and by genre category.
    ///
    /// A reader without a record gets an all-zero breakdown.
    pub async fn reading_breakdown(&self, user_id: i32) -> Result<ReadingBreakdown, AppError> {
        let Some(stored) = LibraryRepository::new(self.db).find_by_user(user_id).await? else {
            return Ok(reading_breakdown(Vec::new(), &HashMap::new()));
        };

        let categories: HashMap<String, GenreCategory> = GenreRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(|g| (g.name.to_lowercase(), g.category))
            .collect();

        let ids: Vec<i32> = stored
            .record
            .placed_book_ids()
            .collect::<HashSet<i32>>()
            .into_iter()
            .collect();
        let books: HashMap<i32, Book> = BookRepository::new(self.db)
            .find_active_by_ids(&ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        let placements = stored.record.placements().map(|(_, _, _, placement)| PlacedBook {
            source_type: &placement.source.source_type,
            genres: books
                .get(&placement.book_id)
                .map_or(&[][..], |b| b.genres.as_slice()),
        });

        Ok(reading_breakdown(placements, &categories))
    }
}

fn random_picks<T>(mut pool: Vec<T>, count: usize) -> Vec<T> {
    pool.shuffle(&mut rand::rng());
    pool.truncate(count);
    pool
}
