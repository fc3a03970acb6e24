//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework and SeaORM for database operations.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, access control and DTO conversion
//! - **Service Layer** (`service/`) - Use cases; multi-record writes run in one transaction
//! - **Data Layer** (`data/`) - Repositories converting entities into domain models
//! - **Model Layer** (`model/`) - Domain models, the shelf engine and operation params
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Token extraction and the authorization guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, catalog client, token service)
//! - **Startup** (`startup`) - Database, HTTP client and CORS initialization
//! - **Router** (`router`) - Route table and OpenAPI document
//! - **Scheduler** (`scheduler/`) - Purge of soft deleted readers
//!
//! # Request Flow
//!
//! 1. **Router** matches the route and runs the controller
//! 2. **Middleware** splits the token from the body and resolves the caller
//! 3. **Controller** checks the caller's actions, converts DTOs to params, calls a service
//! 4. **Service** runs the use case against one or more repositories
//! 5. **Controller** converts the domain model to a DTO and responds

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
