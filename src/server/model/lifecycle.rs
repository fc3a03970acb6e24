//! Soft-delete lifecycle shared by readers, admins and books.

use chrono::{DateTime, Utc};

use crate::{model::user::LifecycleDto, server::error::internal::InternalError};

/// Stored state label of an active record.
pub const ACTIVE: &str = "active";
/// Stored state label of a deactivated record.
pub const DEACTIVATED: &str = "deactivated";
/// Stored state label of a soft deleted record.
pub const DELETED: &str = "deleted";

/// Where an account or catalog entry sits in its lifecycle.
///
/// Stored as three columns: a state label, the time of the last transition and
/// the actor that performed it (`"user:3"`, `"admin:1"`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Deactivated { at: DateTime<Utc>, by: String },
    Deleted { at: DateTime<Utc>, by: String },
}

impl Lifecycle {
    /// Rebuilds the lifecycle from its stored columns.
    ///
    /// # Arguments
    /// - `column` - Name of the state column, used in the error when the label is unknown
    /// - `state` - Stored state label
    /// - `at` - Time of the last transition
    /// - `by` - Actor of the last transition
    ///
    /// # Returns
    /// - `Ok(Lifecycle)` - Decoded lifecycle
    /// - `Err(InternalError::UnknownStoredValue)` - Unknown label, or a deactivated/deleted
    ///   state without a timestamp
    pub fn from_columns(
        column: &'static str,
        state: &str,
        at: Option<DateTime<Utc>>,
        by: Option<String>,
    ) -> Result<Self, InternalError> {
        match (state, at) {
            (ACTIVE, _) => Ok(Self::Active),
            (DEACTIVATED, Some(at)) => Ok(Self::Deactivated {
                at,
                by: by.unwrap_or_default(),
            }),
            (DELETED, Some(at)) => Ok(Self::Deleted {
                at,
                by: by.unwrap_or_default(),
            }),
            _ => Err(InternalError::UnknownStoredValue {
                column,
                value: state.to_string(),
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => ACTIVE,
            Self::Deactivated { .. } => DEACTIVATED,
            Self::Deleted { .. } => DELETED,
        }
    }

    pub fn at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Deactivated { at, .. } | Self::Deleted { at, .. } => Some(*at),
        }
    }

    pub fn by(&self) -> Option<&str> {
        match self {
            Self::Active => None,
            Self::Deactivated { by, .. } | Self::Deleted { by, .. } => Some(by),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    /// Splits the lifecycle into its three stored columns.
    pub fn into_columns(self) -> (String, Option<DateTime<Utc>>, Option<String>) {
        let label = self.label().to_string();
        match self {
            Self::Active => (label, None, None),
            Self::Deactivated { at, by } | Self::Deleted { at, by } => (label, Some(at), Some(by)),
        }
    }

    pub fn into_dto(self) -> LifecycleDto {
        let (state, at, by) = self.into_columns();
        LifecycleDto { state, at, by }
    }
}
