//! SaDA REST API entry point.
//!
//! Binary name: `sada`
//!
//! Parses CLI arguments, loads configuration from the data directory,
//! initializes the database and services, then serves the HTTP API until
//! interrupted.

mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use http::router::build_router;
use sada_infra::config::{load_config, resolve_data_dir};
use state::AppState;

#[derive(Parser)]
#[command(name = "sada", version, about = "Smart document analysis & customer support service")]
struct Args {
    /// Address to bind the HTTP server to (overrides config.toml)
    #[arg(long)]
    bind: Option<String>,

    /// Data directory holding config.toml and the SQLite database
    #[arg(long, env = "SADA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Export spans to stdout via OpenTelemetry
    #[arg(long)]
    otel: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 if args.quiet => "error",
        0 => "info,sqlx=warn",
        1 => "debug,sada=debug",
        _ => "trace",
    };
    sada_observe::init_tracing(args.otel, EnvFilter::new(filter))
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir(args.data_dir);
    let mut config = load_config(&data_dir).await;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let state = AppState::init(&config, data_dir).await?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(addr = %config.server.bind, "SaDA API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sada_observe::shutdown_tracing();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {e}");
        return;
    }
    tracing::info!("shutdown signal received");
}
