use primeskills_web::config::{AppConfig, ConfigService};
use primeskills_web::log::TracingSink;
use primeskills_web::routes::{AppState, router};
use primeskills_web::server;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ConfigService::new();
    let app_config = AppConfig::from_service(&config);
    tracing::info!(
        "Starting {} v{} (debug: {})",
        app_config.name,
        app_config.version,
        app_config.debug
    );

    let addr = format!(
        "{}:{}",
        config.get_or("HOST", "0.0.0.0"),
        config.get_or("PORT", "8000")
    );
    let state = AppState::new(app_config, Arc::new(TracingSink));

    server::serve(router(state), &addr).await
}
