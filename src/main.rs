mod model;
mod server;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    scheduler::purge_users,
    service::{auth::token::TokenService, catalog::GoogleBooksClient},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("boipoka=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let catalog = GoogleBooksClient::new(
        http_client,
        config.catalog_api_url.clone(),
        config.catalog_api_key.clone(),
    );
    let tokens = TokenService::new(&config.jwt_secret, config.jwt_ttl_hours);

    let mut scheduler = purge_users::start_scheduler(
        db.clone(),
        &config.user_purge_schedule,
        config.user_purge_retention_days,
    )
    .await?;

    let app = server::router::router()
        .with_state(AppState::new(db, catalog, tokens))
        .layer(startup::setup_cors(&config)?)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await?;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
