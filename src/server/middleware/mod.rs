//! Request guards.
//!
//! - `token` - Extracts the access token and JSON payload from a request
//! - `auth` - Verifies the token, resolves the caller and checks named actions

pub mod auth;
pub mod token;

#[cfg(test)]
mod test;
