//! Parish CLI - a command-line client for the parish community backend.
//!
//! Log in once, then browse holy items, place orders, follow mass
//! intentions and certificate requests, and read parish news.

mod commands;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::Command;
use parish_core::Config;

/// Directory for rolling log files; unset means stderr only
const LOG_DIR_ENV: &str = "PARISH_LOG_DIR";

/// Parish CLI - parish community services from the terminal
#[derive(Parser, Debug)]
#[command(name = "parish")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "parish.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    let gateway = config.gateway()?;
    info!(api_url = %gateway.base_url(), "Parish CLI starting");

    if let Err(e) = commands::run(cli.command, &gateway, &mut config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
