use crate::{
    model::borrow::BorrowStatus,
    server::{
        data::borrow_request::BorrowRequestRepository,
        error::AppError,
        model::borrow::CreateBorrowParams,
    },
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find_by_owner;
mod transition;
