//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce business
//! rules, coordinate several repositories inside one transaction where a use case
//! touches more than one table, and work with domain models rather than DTOs or
//! entity models.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod book;
pub mod borrow;
pub mod catalog;
pub mod circle;
pub mod genre;
pub mod library;
pub mod purge;
pub mod user;

#[cfg(test)]
mod test;
