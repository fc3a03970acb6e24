//! HTTP handlers grouped by resource.
//!
//! Handlers authenticate through `AuthGuard`, convert DTOs into params, call one
//! service method and convert the resulting domain model back into a DTO.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod book;
pub mod borrow;
pub mod circle;
pub mod genre;
pub mod library;
pub mod super_admin;
pub mod user;
