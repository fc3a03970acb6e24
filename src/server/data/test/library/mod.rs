use crate::server::{
    data::library::LibraryRepository,
    error::{library::LibraryError, AppError},
    model::library::{LibraryRecord, PlaceBook, Source},
};
use test_utils::{builder::TestBuilder, factory};

mod find_by_user;
mod save;

fn place(book_id: i32, library: &str) -> PlaceBook {
    PlaceBook {
        book_id,
        library_name: library.to_string(),
        shelf_index: 0,
        position: 0,
        read_progress: 0,
        status: None,
        source: Source::default(),
    }
}
