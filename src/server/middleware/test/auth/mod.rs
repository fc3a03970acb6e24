use crate::{
    model::auth::Role,
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::{permits, Action, AuthGuard, Principal},
        service::auth::token::TokenService,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod permits;
mod require;

fn tokens() -> TokenService {
    TokenService::new("guard-secret", 1)
}
