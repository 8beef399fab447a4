// File: services/meetme_backend/src/main.rs
use meetme_backend::{app_state::AppState, build_app, service_factory::MeetmeServiceFactory};
use meetme_common::logging;
use meetme_config::load_config;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Arc::new(load_config()?);
    // Held until shutdown so buffered file logs are flushed.
    let _log_guard = logging::init_from_config(&config.logging);

    let factory = MeetmeServiceFactory::new(config.clone()).await?;
    let state = AppState::new(config.clone(), &factory)?;
    let app = build_app(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
