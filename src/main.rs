//! CLI for PullSub
//!
//! Starts the HTTP server. Configuration is read from `config/default.toml`
//! and environment variables; command-line flags take precedence over both.

use std::sync::Arc;

use clap::Parser;
use pullsub::broker::Broker;
use pullsub::config::load_config;
use pullsub::persistence::SledMessageStore;
use pullsub::transport::http::{AppState, build_router, serve};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pullsub")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
    /// Directory for the on-disk message store
    #[arg(long)]
    data_dir: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    pullsub::utils::logging::init(&args.log_level);

    if let Err(e) = run_server(args).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }

    let store = Arc::new(SledMessageStore::open(&config.storage.data_dir)?);
    info!("Message store opened at {}", config.storage.data_dir);

    let broker = Arc::new(Broker::new(store.clone()));
    let router = build_router(AppState { broker });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, router, shutdown_signal()).await?;

    store.flush()?;
    info!("Message store flushed. Exiting gracefully.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received.");
}
