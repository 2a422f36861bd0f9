//! Docshelf server entry point.
//!
//! Opens the document store, loads the credential file, and starts the
//! Axum HTTP server with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use docshelf_core::credentials::Credentials;
use docshelf_core::error::CredentialError;
use docshelf_core::render::ContentRenderer;
use docshelf_core::session::SessionStore;
use docshelf_store::FsStore;

use docshelf_server::config::ServerConfig;
use docshelf_server::routes;
use docshelf_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(data_dir = %config.data_dir.display(), "docshelf starting");

    let store = FsStore::open(&config.data_dir)
        .with_context(|| format!("failed to open store at {}", config.data_dir.display()))?;

    // A missing credential file is not fatal — browsing stays available,
    // every sign-in attempt fails. A malformed file is an operator error.
    let credentials = match Credentials::load(&config.users_file) {
        Ok(creds) => creds,
        Err(err @ CredentialError::Read { .. }) => {
            warn!(error = %err, "credential file unavailable — sign-in disabled");
            Credentials::empty()
        }
        Err(err) => {
            return Err(anyhow::Error::new(err).context("failed to load credential file"));
        }
    };

    if credentials.is_empty() {
        warn!("no users loaded — all sign-in attempts will fail");
    } else {
        info!(users = credentials.len(), "credentials loaded");
    }

    let state = Arc::new(AppState {
        store: Arc::new(store),
        renderer: ContentRenderer::new(),
        credentials,
        sessions: SessionStore::new(),
    });

    let app = routes::router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "docshelf listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("docshelf stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
