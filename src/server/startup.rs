use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};

use crate::server::{config::Config, error::AppError};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for catalog lookups.
///
/// Redirects are disabled so a catalog response can never bounce requests to another
/// host, and a timeout keeps a slow catalog from holding request handlers open.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - TLS backend failed to initialize
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(10))
        .build()?;

    Ok(client)
}

/// Builds the CORS layer from the configured origin.
///
/// Without `CORS_ALLOWED_ORIGIN` any origin is accepted.
///
/// # Returns
/// - `Ok(CorsLayer)` - Layer to apply to the router
/// - `Err(AppError::ConfigErr)` - Origin is not a valid header value
pub fn setup_cors(config: &Config) -> Result<CorsLayer, AppError> {
    use crate::server::error::config::ConfigError;

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match &config.cors_allowed_origin {
        Some(origin) => {
            let origin = origin
                .parse::<axum::http::HeaderValue>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: "CORS_ALLOWED_ORIGIN".to_string(),
                    value: origin.clone(),
                })?;
            Ok(layer.allow_origin(origin))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}
