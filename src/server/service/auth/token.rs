//! Access token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the account id and role. They are stateless: a
//! token stays valid until it expires, and the account it names is re-read on
//! every request by the auth guard.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    model::auth::Role,
    server::error::{auth::AuthError, AppError},
};

/// Claims stored in every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Creates a token service signing with the given secret.
    ///
    /// # Arguments
    /// - `secret` - Shared HMAC secret
    /// - `ttl_hours` - Lifetime of issued tokens
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Issues a token for the account.
    ///
    /// # Returns
    /// - `Ok(String)` - Encoded token
    /// - `Err(AppError::JwtErr)` - Signing failed
    pub fn issue(&self, id: i32, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verifies signature and expiry and returns the claims.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is valid
    /// - `Err(AuthError::InvalidToken)` - Bad signature, expired, or malformed
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let tokens = TokenService::new("secret", 1);
        let token = tokens.issue(7, Role::Admin).unwrap();

        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.id, 7);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = TokenService::new("one", 1).issue(1, Role::User).unwrap();

        let result = TokenService::new("two", 1).verify(&token);

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let tokens = TokenService::new("secret", -2);
        let token = tokens.issue(1, Role::User).unwrap();

        assert!(matches!(
            tokens.verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        let tokens = TokenService::new("secret", 1);

        assert!(tokens.verify("not-a-token").is_err());
    }
}
