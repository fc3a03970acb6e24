use chrono::Utc;

use crate::server::{
    error::internal::InternalError,
    model::lifecycle::{Lifecycle, DELETED},
};

/// Tests decoding and re-encoding a deleted lifecycle.
///
/// Expected: the stored columns survive unchanged
#[test]
fn deleted_lifecycle_keeps_actor_and_time() {
    let at = Utc::now();

    let lifecycle =
        Lifecycle::from_columns("user.lifecycle", DELETED, Some(at), Some("admin:1".into()))
            .unwrap();

    assert!(lifecycle.is_deleted());
    assert!(!lifecycle.is_active());
    assert_eq!(lifecycle.by(), Some("admin:1"));
    assert_eq!(
        lifecycle.into_columns(),
        (DELETED.to_string(), Some(at), Some("admin:1".to_string()))
    );
}

/// Tests stored states that cannot be decoded.
///
/// Expected: UnknownStoredValue for an unknown label and for a deletion without a time
#[test]
fn rejects_unknown_or_incomplete_state() {
    assert!(matches!(
        Lifecycle::from_columns("user.lifecycle", "archived", None, None),
        Err(InternalError::UnknownStoredValue { .. })
    ));
    assert!(matches!(
        Lifecycle::from_columns("user.lifecycle", DELETED, None, None),
        Err(InternalError::UnknownStoredValue { .. })
    ));
}
