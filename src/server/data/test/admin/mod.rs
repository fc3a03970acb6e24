use crate::server::{
    data::admin::{AdminRepository, SuperAdminRepository},
    error::AppError,
    model::{
        admin::{RegisterAdminParams, UpdateAdminParams},
        lifecycle::Lifecycle,
    },
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_all;
mod super_admin;
mod verify;
