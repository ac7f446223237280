use std::sync::Arc;

use anyhow::Context;
use crop_yield_backend::{config::AppConfig, routes, state::AppState};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crop_yield_backend=debug".into()),
        )
        .init();

    let config = AppConfig::from_env().context("reading configuration")?;
    let state = Arc::new(AppState::new(config.predict_delay));

    let app = routes::create_router()
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("binding {}", config.bind_addr()))?;

    info!(
        addr = %listener.local_addr()?,
        static_dir = %config.static_dir.display(),
        predict_delay_ms = config.predict_delay.as_millis() as u64,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
