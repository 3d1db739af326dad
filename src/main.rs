/// Service entry point
use dsn_now::config::AppConfig;
use dsn_now::handlers::AppState;
use dsn_now::routes::build_router;
use dsn_now::{DsnService, HttpClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env();
    info!(
        "Configuration loaded (config feed: {}, state feed: {}, max config age: {}s)",
        config.urls.configuration,
        config.urls.state,
        config.max_config_age.num_seconds()
    );

    let http_client = HttpClient::new(config.http_timeout)?;
    let service = Arc::new(DsnService::new(http_client, config.urls.clone()));

    let state = AppState {
        service,
        max_config_age: config.max_config_age,
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("dsn_now service listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
