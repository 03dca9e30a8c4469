pub mod api; // Web front end: pages, JSON API, server lifecycle
pub mod backend; // Prediction service client
pub mod config;
pub mod content; // Static marketing content
pub mod flow; // Prediction flow state machine
pub mod models;
pub mod pages; // HTML rendering
pub mod sessions;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::api::AppContext;
use crate::backend::HttpRiskBackend;
use crate::config::FrontendConfig;

/// Run the front end until Ctrl-C.
pub async fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = FrontendConfig::from_env();
    tracing::info!(
        bind = %config.bind_addr,
        backend = %config.backend_url,
        step_delay_ms = config.step_delay.as_millis() as u64,
        reveal_delay_ms = config.reveal_delay.as_millis() as u64,
        session_ttl_secs = config.session_ttl.as_secs(),
        "Configuration loaded"
    );

    let backend = HttpRiskBackend::new(&config.backend_url, config.request_timeout)
        .map_err(|e| e.to_string())?;
    let bind_addr = config.bind_addr;
    let ctx = AppContext::new(config, Arc::new(backend));

    let mut server = api::start_server(ctx, bind_addr).await?;
    tracing::info!(
        addr = %server.session.server_addr,
        "{} ready at http://{}",
        config::APP_NAME,
        server.session.server_addr
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
    }
    server.shutdown();
    // Let in-flight requests drain.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    Ok(())
}
