use crate::{
    model::genre::GenreCategory,
    server::{data::genre::GenreRepository, error::AppError},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod set_category;
