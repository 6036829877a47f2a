//! `fsgate` — credential-gated filesystem browser.
//!
//! Startup sequence:
//! 1. Merge an optional `.env` file, then load and validate [`Config`] from
//!    environment variables.
//! 2. Initialise the tracing subscriber (JSON logs, optional OTLP export).
//! 3. Build the Axum router and serve it on `0.0.0.0:<PORT>` until SIGINT/SIGTERM.

mod browse;
mod config;
mod server;
mod telemetry;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use server::state::{AppState, Credentials};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let dotenv = config::load_dotenv(None).map_err(|e| {
        eprintln!("ERROR: {e:#}");
        e
    })?;
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otlp_endpoint(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        otlp = cfg.otlp_endpoint().is_some(),
        dotenv = ?dotenv,
        "fsgate starting"
    );

    // -----------------------------------------------------------------------
    // 3. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(Credentials::new(
        cfg.auth_user.clone(),
        cfg.auth_pass.clone(),
    ));
    let router = server::router::build(state);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, url = %format!("http://localhost:{}", cfg.port), "file browser listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    if cfg.otlp_endpoint().is_some() {
        opentelemetry::global::shutdown_tracer_provider();
    }
    info!("fsgate stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
