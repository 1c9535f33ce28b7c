//! wildcard-router
//!
//! Serves one mount point through an ordered chain of fallback handlers.
//!
//! ```text
//!     Client Request
//!     ──────────▶ listener ──▶ axum layers ──▶ mount (prefix, body limit)
//!                                                   │
//!                                                   ▼
//!                                   middlewares (real response)
//!                                                   │
//!                                                   ▼
//!                       handler 1 ──404──▶ handler 2 ──404──▶ ... ──▶ 404
//!                           │                  │
//!                           ▼                  ▼
//!     Client Response ◀──────── first non-404 answer
//! ```

use std::path::PathBuf;

use clap::Parser;

use wildcard_router::config::{load_config, RouterConfig};
use wildcard_router::lifecycle::{wait_for_shutdown_signal, Shutdown};
use wildcard_router::observability::{logging, metrics};
use wildcard_router::HttpServer;

#[derive(Parser)]
#[command(name = "wildcard-router")]
#[command(about = "Fallback-chaining HTTP router", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if config.mount.not_found_body.is_none() {
        config.mount.not_found_body = Some("404 page not found\n".to_string());
    }

    logging::init_tracing(&config.observability.log_level);
    tracing::info!("wildcard-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        prefix = %config.mount.prefix,
        handlers = config.handlers.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    if config.handlers.is_empty() {
        tracing::warn!("No handlers configured; every request will get 404");
    }

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let server = HttpServer::new(config)?;
    let listener = server.bind().await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
