//! Registration and sign-in for every account kind.
//!
//! Reader flows live in `reader`, admin and super admin flows in `staff`. Every
//! successful sign-in returns a fresh access token issued by `TokenService`.

use sea_orm::DatabaseConnection;

use crate::server::service::auth::token::TokenService;

pub mod password;
pub mod reader;
pub mod staff;
pub mod token;

pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }
}

/// A successful sign-in: the issued token and the signed-in account.
#[derive(Debug, Clone)]
pub struct SignedIn<T> {
    pub token: String,
    pub account: T,
}
