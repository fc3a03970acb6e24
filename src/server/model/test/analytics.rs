use std::collections::HashMap;

use crate::{
    model::genre::GenreCategory,
    server::model::analytics::{
        genre_distribution, percentage, rank_placements, reading_breakdown, split_percentage,
        PlacedBook, OTHERS_BUCKET,
    },
};

fn catalog(names: &[&str]) -> HashMap<String, String> {
    names
        .iter()
        .map(|n| (n.to_lowercase(), n.to_string()))
        .collect()
}

/// Tests that genres missing from the catalog are bucketed as Others.
///
/// Expected: the known genre listed by name, the unknown one counted under Others
#[test]
fn genre_distribution_buckets_unknown_genres() {
    let shares = genre_distribution(["Fiction", "Klingon Poetry"], &catalog(&["Fiction"]));

    let names: Vec<&str> = shares.iter().map(|s| s.genre.as_str()).collect();
    assert_eq!(names, vec!["Fiction", OTHERS_BUCKET]);
    assert_eq!(shares[0].percentage, 50.0);
    assert_eq!(shares[1].count, 1);
    assert_eq!(shares[1].percentage, 50.0);
}

/// Tests that every known genre is listed, however many there are.
///
/// Expected: known genres ranked by count then name under their catalog spelling,
/// no Others bucket
#[test]
fn genre_distribution_lists_all_known_genres() {
    let known = catalog(&["Fantasy", "Poetry", "History", "Drama", "Science", "Travel"]);
    let genres = [
        "fantasy", "Fantasy", "Poetry", "History", "Drama", "Science", "Travel",
    ];

    let shares = genre_distribution(genres, &known);

    let names: Vec<&str> = shares.iter().map(|s| s.genre.as_str()).collect();
    assert_eq!(
        names,
        vec!["Fantasy", "Drama", "History", "Poetry", "Science", "Travel"]
    );
    assert_eq!(shares[0].count, 2);
    let total: u64 = shares.iter().map(|s| s.count).sum();
    assert_eq!(total, genres.len() as u64);
}

/// Tests the distribution with an empty genre catalog.
///
/// Expected: everything lands in Others
#[test]
fn genre_distribution_without_catalog() {
    let shares = genre_distribution(["Poetry", "Drama"], &HashMap::new());

    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].genre, OTHERS_BUCKET);
    assert_eq!(shares[0].percentage, 100.0);
}

/// Tests percentage helpers with an empty total.
///
/// Expected: zero instead of NaN
#[test]
fn percentages_handle_zero_totals() {
    assert_eq!(percentage(0, 0), 0.0);
    assert_eq!(split_percentage(0, 0), (0.0, 0.0));
    assert_eq!(split_percentage(1, 2), (33.33, 66.67));
}

/// Tests ranking placements.
///
/// Expected: by count descending, ties by lower id, truncated to the limit
#[test]
fn rank_placements_orders_and_truncates() {
    let ranked = rank_placements([5, 3, 5, 9, 3, 1], 3);

    assert_eq!(ranked, vec![(3, 2), (5, 2), (1, 1)]);
}

/// Tests the reading breakdown.
///
/// Expected: counts by source type and by mapped category with derived splits
#[test]
fn reading_breakdown_counts_sources_and_categories() {
    let categories = HashMap::from([
        ("fantasy".to_string(), GenreCategory::Fiction),
        ("history".to_string(), GenreCategory::NonFiction),
        ("textbook".to_string(), GenreCategory::Academic),
    ]);
    let fantasy = vec!["Fantasy".to_string()];
    let mixed = vec!["History".to_string(), "Textbook".to_string()];
    let unknown = vec!["Zine".to_string()];

    let breakdown = reading_breakdown(
        [
            PlacedBook {
                source_type: "owned",
                genres: &fantasy,
            },
            PlacedBook {
                source_type: "owned",
                genres: &fantasy,
            },
            PlacedBook {
                source_type: "borrowed",
                genres: &mixed,
            },
            PlacedBook {
                source_type: "owned",
                genres: &unknown,
            },
        ],
        &categories,
    );

    assert_eq!(
        breakdown.by_source_type,
        vec![("owned".to_string(), 3), ("borrowed".to_string(), 1)]
    );

    let dto = breakdown.into_dto();
    assert_eq!(dto.by_category[0].label, "Fiction");
    assert_eq!(dto.by_category[0].count, 2);
    assert_eq!(dto.by_category[1].count, 1);
    assert_eq!(dto.by_category[2].count, 1);
    assert_eq!(dto.by_category[3].count, 0);
    assert_eq!(dto.fiction_percentage, 66.67);
    assert_eq!(dto.non_fiction_percentage, 33.33);
    assert_eq!(dto.academic_percentage, 100.0);
    assert_eq!(dto.leisure_percentage, 0.0);
}
