//! Analytics rollups and the pure aggregation helpers behind them.

use std::collections::HashMap;

use crate::{
    model::{
        analytics::{CatalogSummaryDto, CountDto, GenreShareDto, MostPlacedDto, ReadingBreakdownDto},
        genre::GenreCategory,
    },
    server::model::book::Book,
};

/// Label of the bucket collecting every genre missing from the genre catalog.
pub const OTHERS_BUCKET: &str = "Others";

/// Default number of books in the most placed ranking.
pub const DEFAULT_MOST_PLACED: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total_books: u64,
    pub total_users: u64,
    pub total_genres: u64,
    pub added_last_7_days: u64,
    pub added_last_30_days: u64,
}

impl CatalogSummary {
    pub fn into_dto(self) -> CatalogSummaryDto {
        CatalogSummaryDto {
            total_books: self.total_books,
            total_users: self.total_users,
            total_genres: self.total_genres,
            added_last_7_days: self.added_last_7_days,
            added_last_30_days: self.added_last_30_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreShare {
    pub genre: String,
    pub count: u64,
    pub percentage: f64,
}

impl GenreShare {
    pub fn into_dto(self) -> GenreShareDto {
        GenreShareDto {
            genre: self.genre,
            count: self.count,
            percentage: self.percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MostPlaced {
    pub book: Book,
    pub placements: u64,
}

impl MostPlaced {
    pub fn into_dto(self) -> MostPlacedDto {
        MostPlacedDto {
            book: self.book.into_dto(),
            placements: self.placements,
        }
    }
}

/// A reader's placements grouped by source type and by genre category.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingBreakdown {
    pub by_source_type: Vec<(String, u64)>,
    pub by_category: Vec<(GenreCategory, u64)>,
}

impl ReadingBreakdown {
    fn category_count(&self, category: GenreCategory) -> u64 {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }

    pub fn into_dto(self) -> ReadingBreakdownDto {
        let (fiction_percentage, non_fiction_percentage) = split_percentage(
            self.category_count(GenreCategory::Fiction),
            self.category_count(GenreCategory::NonFiction),
        );
        let (academic_percentage, leisure_percentage) = split_percentage(
            self.category_count(GenreCategory::Academic),
            self.category_count(GenreCategory::Leisure),
        );

        ReadingBreakdownDto {
            by_source_type: self
                .by_source_type
                .into_iter()
                .map(|(label, count)| CountDto { label, count })
                .collect(),
            by_category: self
                .by_category
                .into_iter()
                .map(|(category, count)| CountDto {
                    label: category.label().to_string(),
                    count,
                })
                .collect(),
            fiction_percentage,
            non_fiction_percentage,
            academic_percentage,
            leisure_percentage,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `count` in `total` as a percentage rounded to two decimals.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

/// Splits two counts into percentages of their sum. Both are zero when the sum is.
pub fn split_percentage(a: u64, b: u64) -> (f64, f64) {
    let total = a + b;
    (percentage(a, total), percentage(b, total))
}

/// Sorts counted labels by count descending then label ascending.
fn rank_labels(counts: HashMap<String, u64>) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Genre distribution over catalog books.
///
/// Each book counts once per genre it carries. Genres found in `known` (keyed by
/// lowercased name, valued by the catalog spelling) are listed individually under
/// their catalog name, ordered by count descending then name. Every other genre is
/// folded into a trailing `Others` bucket, which is omitted when empty. Percentages
/// are relative to the total genre count.
pub fn genre_distribution<'a>(
    genres: impl IntoIterator<Item = &'a str>,
    known: &HashMap<String, String>,
) -> Vec<GenreShare> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut others: u64 = 0;
    for genre in genres {
        match known.get(&genre.to_lowercase()) {
            Some(name) => *counts.entry(name.clone()).or_default() += 1,
            None => others += 1,
        }
    }

    let total: u64 = counts.values().sum::<u64>() + others;

    let mut shares: Vec<GenreShare> = rank_labels(counts)
        .into_iter()
        .map(|(genre, count)| GenreShare {
            percentage: percentage(count, total),
            genre,
            count,
        })
        .collect();

    if others > 0 {
        shares.push(GenreShare {
            genre: OTHERS_BUCKET.to_string(),
            count: others,
            percentage: percentage(others, total),
        });
    }

    shares
}

/// Ranks book ids by how often they are placed, ties broken by lower id.
pub fn rank_placements(book_ids: impl IntoIterator<Item = i32>, limit: usize) -> Vec<(i32, u64)> {
    let mut counts: HashMap<i32, u64> = HashMap::new();
    for id in book_ids {
        *counts.entry(id).or_default() += 1;
    }

    let mut ranked: Vec<(i32, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// One placement as seen by the reading breakdown.
#[derive(Debug, Clone, Copy)]
pub struct PlacedBook<'a> {
    pub source_type: &'a str,
    pub genres: &'a [String],
}

/// Counts placements by source type and by the category of each genre they carry.
///
/// Genres missing from `categories` are not counted. Lookups are case-insensitive.
pub fn reading_breakdown<'a>(
    placements: impl IntoIterator<Item = PlacedBook<'a>>,
    categories: &HashMap<String, GenreCategory>,
) -> ReadingBreakdown {
    let mut by_source: HashMap<String, u64> = HashMap::new();
    let mut by_category: HashMap<GenreCategory, u64> = HashMap::new();

    for placed in placements {
        *by_source.entry(placed.source_type.to_string()).or_default() += 1;
        for genre in placed.genres {
            if let Some(category) = categories.get(&genre.to_lowercase()) {
                *by_category.entry(*category).or_default() += 1;
            }
        }
    }

    let by_category = [
        GenreCategory::Fiction,
        GenreCategory::NonFiction,
        GenreCategory::Academic,
        GenreCategory::Leisure,
    ]
    .into_iter()
    .map(|c| (c, by_category.get(&c).copied().unwrap_or(0)))
    .collect();

    ReadingBreakdown {
        by_source_type: rank_labels(by_source),
        by_category,
    }
}
