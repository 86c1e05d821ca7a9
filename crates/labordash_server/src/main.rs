//! Labordash Server
//!
//! Serves the workforce forecast dashboard on a local port.

#![warn(missing_docs)]
#![warn(clippy::all)]

use anyhow::Result;
use clap::Parser;
use labordash_server::config::{DEFAULT_ASSETS_DIR, DEFAULT_BIND};
use labordash_server::{DashboardServer, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labordash-server")]
#[command(about = "Workforce forecast dashboard server", long_about = None)]
struct Args {
    /// Bind address
    #[arg(short, long, default_value = DEFAULT_BIND)]
    bind: String,
    /// Directory holding the visualization artifacts
    #[arg(short, long, default_value = DEFAULT_ASSETS_DIR)]
    assets: PathBuf,
    /// JSON file replacing the built-in metrics snapshot
    #[arg(short, long)]
    metrics: Option<PathBuf>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            bind: args.bind,
            assets_dir: args.assets,
            metrics: args.metrics,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("labordash=debug,tower_http=debug")),
        )
        .init();

    let server = DashboardServer::new(args.into())?;
    server.serve().await?;

    Ok(())
}
