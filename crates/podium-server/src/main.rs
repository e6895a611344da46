//! Podium server binary.
//!
//! Loads `.env` and configuration, then serves the chatbot and interview
//! relay routes until SIGTERM/SIGINT.

use podium_server::{app, config, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Vendor keys usually live in a local .env; a missing file is fine.
    let dotenv = dotenvy::dotenv();

    let (config_path, config_source) = config::resolve_config_path(
        std::env::args().nth(1),
        std::env::var("PODIUM_CONFIG_PATH").ok(),
    );

    let config = config::load_config(Some(&config_path))
        .expect("failed to load configuration; the server cannot start without valid config");

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match &dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded environment from .env"),
        Err(e) if e.not_found() => tracing::debug!("no .env file, using process environment"),
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
    }
    tracing::info!(
        source = config_source.as_str(),
        path = %config_path,
        "resolved configuration file"
    );
    config.warn_unconfigured();

    let state = AppState::from_config(&config);
    let app = app(state);
    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(%addr, "starting podium relay");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address; is another process using this port?");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("podium relay stopped");
}

/// Resolves once SIGINT or SIGTERM arrives. In-flight vendor calls are
/// allowed to finish before the listener closes.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "shutdown requested, draining in-flight relay requests");
}
