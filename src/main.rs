use anyhow::Context;
use codegen_relay::config::RelayConfig;
use codegen_relay::{AppState, build_app, logger};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {

    dotenvy::dotenv().ok();

    let config = RelayConfig::from_env()?;
    logger::init_tracing(config.log_format)?;

    // create app state
    let state = AppState::from_config(&config)
        .context("failed to build upstream http client")?;

    let app = build_app(state);

    let listener = TcpListener::bind(config.bind_addr).await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(
        addr = %listener.local_addr()?,
        upstream = %config.service_url,
        timeout_secs = config.timeout.as_secs(),
        "codegen relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    Ok(())

}

async fn shutdown_signal() {

    if let Err(e) = tokio::signal::ctrl_c().await {
        // keep serving, the process can still be killed
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutting down");

}
