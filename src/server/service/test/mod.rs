use crate::server::{
    error::{auth::AuthError, library::LibraryError, AppError},
    model::library::{PlaceBook, Source},
};
use test_utils::{builder::TestBuilder, factory};

mod analytics;
mod book;
mod borrow;
mod library;
mod purge;

fn place(book_id: i32, library: &str, shelf_index: i32, position: i32) -> PlaceBook {
    PlaceBook {
        book_id,
        library_name: library.to_string(),
        shelf_index,
        position,
        read_progress: 0,
        status: None,
        source: Source::default(),
    }
}
