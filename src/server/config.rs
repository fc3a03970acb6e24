use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_CATALOG_API_URL: &str = "https://www.googleapis.com/books/v1/volumes";
const DEFAULT_PURGE_SCHEDULE: &str = "0 0 3 * * *";
const DEFAULT_JWT_TTL_HOURS: i64 = 24;
const DEFAULT_PURGE_RETENTION_DAYS: i64 = 15;

pub struct Config {
    pub database_url: String,

    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,

    pub bind_address: String,
    pub cors_allowed_origin: Option<String>,

    pub catalog_api_url: String,
    pub catalog_api_key: Option<String>,

    pub user_purge_retention_days: i64,
    pub user_purge_schedule: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl_hours: parsed("JWT_TTL_HOURS", DEFAULT_JWT_TTL_HOURS)?,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            cors_allowed_origin: optional("CORS_ALLOWED_ORIGIN"),
            catalog_api_url: optional("CATALOG_API_URL")
                .unwrap_or_else(|| DEFAULT_CATALOG_API_URL.to_string()),
            catalog_api_key: optional("CATALOG_API_KEY"),
            user_purge_retention_days: parsed(
                "USER_PURGE_RETENTION_DAYS",
                DEFAULT_PURGE_RETENTION_DAYS,
            )?,
            user_purge_schedule: optional("USER_PURGE_SCHEDULE")
                .unwrap_or_else(|| DEFAULT_PURGE_SCHEDULE.to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Unset and empty variables are both treated as absent.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
