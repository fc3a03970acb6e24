use crate::server::{
    data::user_circle::UserCircleRepository, error::AppError, model::circle::LinkKind,
};
use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers},
};

mod memberships;
