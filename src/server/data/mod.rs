//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! Every repository is generic over `ConnectionTrait`, so the same queries run on the
//! connection pool or inside a transaction opened by a service.

pub mod admin;
pub mod book;
pub mod borrow_request;
pub mod genre;
pub mod inner_circle;
pub mod library;
pub mod user;
pub mod user_circle;

#[cfg(test)]
mod test;
