//! Wire types for the JSON API.
//!
//! Every request and response body is declared here with `serde` for the wire format
//! and `utoipa::ToSchema` for the generated OpenAPI document. Enumerations that are
//! shared by the wire format and the domain (reading status, genre category, circle
//! roles and so on) also live here so both layers agree on their spelling.

pub mod admin;
pub mod analytics;
pub mod api;
pub mod auth;
pub mod book;
pub mod borrow;
pub mod circle;
pub mod genre;
pub mod library;
pub mod user;
