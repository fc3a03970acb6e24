use serde::Deserialize;

use crate::{model::api::NoPayload, server::middleware::token::split_body};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Progress {
    read_progress: i32,
}

/// Tests that the token field is removed before the payload is decoded.
///
/// Expected: token returned separately and the payload decodes without it
#[test]
fn splits_token_from_payload() {
    let (token, payload): (_, Progress) =
        split_body(br#"{"token":"abc","readProgress":40}"#).unwrap();

    assert_eq!(token.as_deref(), Some("abc"));
    assert_eq!(payload.read_progress, 40);
}

/// Tests an empty body on a token-only endpoint.
///
/// Expected: no token and an empty payload
#[test]
fn empty_body_is_empty_object() {
    let (token, _): (_, NoPayload) = split_body(b"").unwrap();

    assert!(token.is_none());
}

/// Tests a body that is not JSON.
///
/// Expected: Err(AppError::BadRequest)
#[test]
fn rejects_malformed_body() {
    let result: Result<(_, NoPayload), _> = split_body(b"{token:");

    assert!(matches!(
        result,
        Err(crate::server::error::AppError::BadRequest(_))
    ));
}
