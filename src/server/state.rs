//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Catalog client for the external book catalog API
//! - Token service for issuing and verifying access tokens

use sea_orm::DatabaseConnection;

use crate::server::service::{auth::token::TokenService, catalog::GoogleBooksClient};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `GoogleBooksClient` wraps a `reqwest::Client`, which uses an `Arc` internally
/// - `TokenService` holds the signing keys
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Client for the external book catalog, used on local cache misses.
    pub catalog: GoogleBooksClient,

    /// Issues and verifies the bearer tokens carried in request bodies.
    pub tokens: TokenService,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `catalog` - External catalog client
    /// - `tokens` - Token service configured with the signing secret
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, catalog: GoogleBooksClient, tokens: TokenService) -> Self {
        Self {
            db,
            catalog,
            tokens,
        }
    }
}
