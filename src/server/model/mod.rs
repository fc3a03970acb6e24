//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! The shelf engine in `library` is pure: every library invariant is enforced by methods
//! on `LibraryRecord` before a record is written back.

pub mod admin;
pub mod analytics;
pub mod book;
pub mod borrow;
pub mod circle;
pub mod genre;
pub mod library;
pub mod lifecycle;
pub mod user;

#[cfg(test)]
mod test;

use serde::{de::DeserializeOwned, Serialize};

use crate::server::error::internal::InternalError;

/// Decodes a JSON column into its domain shape.
pub(crate) fn decode_json<T: DeserializeOwned>(
    column: &'static str,
    value: serde_json::Value,
) -> Result<T, InternalError> {
    serde_json::from_value(value).map_err(|source| InternalError::CorruptJson { column, source })
}

/// Encodes a domain value for a JSON column.
pub(crate) fn encode_json<T: Serialize>(
    column: &'static str,
    value: &T,
) -> Result<serde_json::Value, InternalError> {
    serde_json::to_value(value).map_err(|source| InternalError::JsonEncode { column, source })
}
