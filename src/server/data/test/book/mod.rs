use crate::server::{
    data::book::BookRepository,
    error::AppError,
    model::book::UpsertBookParams,
};
use chrono::{Duration, Utc};
use sea_orm::TransactionTrait;
use test_utils::{builder::TestBuilder, factory};

mod count_added_since;
mod create;
mod find_by_genre;
mod merge;
mod search;

fn volume(title: &str, isbns: &[&str]) -> UpsertBookParams {
    UpsertBookParams {
        isbns: isbns.iter().map(|i| i.to_string()).collect(),
        title: title.to_string(),
        authors: vec!["Bibhutibhushan Bandyopadhyay".to_string()],
        publisher: "Signet Press".to_string(),
        publication_year: Some(1929),
        genres: vec!["Fiction".to_string()],
        description: String::new(),
        cover_image: String::new(),
        languages: vec!["bn".to_string()],
        rating: 4.5,
    }
}
