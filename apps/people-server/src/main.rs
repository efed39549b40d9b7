//! REST API server for the people directory.
//!
//! Wires the in-memory person store, optional seed data and the HTTP router
//! together, with graceful shutdown on ctrl-c.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use people_api::{router::Router, server::Server};
use people_core::{config::ServerConfig, InMemoryPersonStore};
use tokio::signal;

/// Command-line arguments for the people server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// JSON file with an array of people to load at startup
    #[arg(long)]
    seed_file: Option<PathBuf>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            request_timeout_ms: args.request_timeout_ms,
            seed_file: args.seed_file,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(ServerConfig::from(Args::parse()));

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let store = match &config.seed_file {
        Some(path) => InMemoryPersonStore::from_json_file(path)
            .with_context(|| format!("Failed to seed store from {}", path.display()))?,
        None => InMemoryPersonStore::new(),
    };
    let store = Arc::new(store);

    let router = Router::new(store, config.clone());

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;
    let server = Server::bind(addr, router)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        request_timeout_ms = config.request_timeout_ms,
        "Starting people server"
    );

    tokio::select! {
        result = server.serve() => {
            result.context("Server stopped accepting connections")?;
        }
        result = signal::ctrl_c() => {
            result.context("Failed to listen for ctrl_c")?;
            tracing::info!("Shutting down server...");
        }
    }

    Ok(())
}
