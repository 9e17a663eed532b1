//! Local HTTP bridge (v1)
//!
//! Lets a process without network egress make HTTP calls by describing them
//! to a trusted local process.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 HTTP BRIDGE                   │
//!   POST /bridge         │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!   {"url", ...}  ───────┼─▶│   net   │───▶│  http   │───▶│  relay   │──┼──▶ Target
//!                        │  │listener │    │ server  │    │ envelope │  │     URL
//!                        │  └─────────┘    └─────────┘    │ + client │  │
//!   {"status","text"}    │                      ▲         └────┬─────┘  │
//!   ◀────────────────────┼──────────────────────┴──────────────┘        │
//!                        │                                               │
//!                        │   config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use http_bridge::config::resolve_config;
use http_bridge::lifecycle::{signals, Shutdown};
use http_bridge::observability::{logging, metrics};
use http_bridge::{net, BridgeServer};

#[derive(Parser)]
#[command(name = "http-bridge")]
#[command(about = "Local HTTP relay for callers without network egress", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to 127.0.0.1:8766)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Config errors are reported before logging exists, so they go to stderr.
    let config = resolve_config(cli.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = config.upstream.timeout_secs,
        max_in_flight = ?config.listener.max_in_flight,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address already checked by validation.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = match net::bind(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    signals::spawn_signal_handler(shutdown);

    let server = BridgeServer::new(&config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
