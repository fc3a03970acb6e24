use crate::{
    model::circle::{CircleRole, InviteStatus},
    server::{data::inner_circle::InnerCircleRepository, error::AppError},
};
use chrono::Utc;
use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers},
};

mod delete;
mod find_with_members;
mod members;
