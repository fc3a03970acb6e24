//! Request body extractor that separates the access token from the payload.
//!
//! Clients send the token as a `token` field of the JSON body, next to the
//! endpoint's own fields. An `Authorization: Bearer` header is accepted as a fallback
//! so body-less requests can authenticate too.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::AUTHORIZATION, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::server::error::AppError;

const TOKEN_FIELD: &str = "token";

/// JSON payload plus the token that came with it.
///
/// An empty body is treated as `{}`, so `TokenJson<NoPayload>` works for requests
/// that only authenticate.
#[derive(Debug)]
pub struct TokenJson<T> {
    pub token: Option<String>,
    pub payload: T,
}

impl<T> TokenJson<T> {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Splits a raw body into its token field and the remaining payload.
pub fn split_body<T: DeserializeOwned>(body: &[u8]) -> Result<(Option<String>, T), AppError> {
    let mut value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?
    };

    let token = match value.as_object_mut().and_then(|o| o.remove(TOKEN_FIELD)) {
        Some(Value::String(token)) if !token.is_empty() => Some(token),
        _ => None,
    };

    let payload = serde_json::from_value(value)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))?;

    Ok((token, payload))
}

impl<S, T> FromRequest<S> for TokenJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let header_token = bearer(req.headers());

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let (body_token, payload) = split_body(&body)?;

        Ok(Self {
            token: body_token.or(header_token),
            payload,
        })
    }
}
