use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        lifecycle::Lifecycle,
        user::{CreateUserParams, SocialProvider, UpdateUserParams},
    },
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod email_or_mobile_taken;
mod find_deleted_before;
mod get_all_paginated;
mod set_lifecycle;
mod update;
