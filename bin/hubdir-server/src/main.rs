//! hubdir-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables and CLI flags.
//! 2. Initialise structured tracing (JSON when asked or in production).
//! 3. Open the document store and run pending migrations.
//! 4. Run the selected command: serve HTTP until shutdown, or reseed.
//! 5. Close the store.

mod cli;
mod config;
mod error;
mod extract;
mod middleware;
mod routes;
mod schemas;
mod state;

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use hubdir_core::seed::default_images;
use hubdir_core::{CatalogService, DocumentStore, StoreOptions};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let cli = Cli::parse();
    let mut cfg = Config::from_env();
    cli.apply(&mut cfg);

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    let _log_guard = init_tracing(&cfg);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %cfg.environment,
        "hubdir-server starting"
    );

    // ── 3. Document store ──────────────────────────────────────────────────────
    let store = Arc::new(DocumentStore::new(
        StoreOptions::new(cfg.database_url.clone()).max_connections(cfg.max_connections),
    ));
    store.connect().await?;
    let catalog = CatalogService::new(Arc::clone(&store));

    // ── 4. Command ─────────────────────────────────────────────────────────────
    let outcome = match cli.command.unwrap_or_default() {
        Command::Serve => serve(cfg, catalog).await,
        Command::Seed => seed(&catalog).await,
    };

    // ── 5. Shutdown ────────────────────────────────────────────────────────────
    store.close().await;
    info!("hubdir-server stopped");
    outcome
}

async fn serve(cfg: Config, catalog: CatalogService) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg.bind_address.parse()?;
    let state = Arc::new(AppState {
        config: Arc::new(cfg),
        catalog,
    });
    let app = routes::build(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Replace the catalog with the bundled seed data and log a per-category
/// summary.
async fn seed(catalog: &CatalogService) -> anyhow::Result<()> {
    let entries = default_images();
    let categories: BTreeSet<String> = entries
        .iter()
        .map(|s| s.entry.category.clone())
        .collect();

    let inserted = catalog.reseed(entries).await?;
    info!(inserted, "seed data loaded");

    for category in &categories {
        let count = catalog.count_entries(Some(category)).await?;
        info!(%category, count, "category summary");
    }
    Ok(())
}

/// Install the global subscriber. The returned guard flushes the file
/// writer and must live until shutdown.
fn init_tracing(cfg: &Config) -> Option<WorkerGuard> {
    // RUST_LOG wins over HUBDIR_LOG; an invalid HUBDIR_LOG falls back to info.
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: HUBDIR_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                EnvFilter::new("info")
            }
        },
    };

    let json = cfg.log_json || cfg.is_production();
    let stdout = if json {
        fmt::layer().with_target(true).json().boxed()
    } else {
        fmt::layer().with_target(true).with_thread_ids(true).boxed()
    };

    let (file, guard) = match &cfg.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "hubdir-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer).json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout)
        .with(file)
        .init();
    guard
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
