use anyhow::Result;
use clap::Parser;

use notelink_cli::cli::{Cli, Commands};
use notelink_cli::commands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = format!("notelink_cli={log_level},notelink_pipeline={log_level}");
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .init();

    match cli.command {
        Commands::Scan {
            dir,
            threshold,
            limit,
            auto,
            dimensions,
        } => commands::scan(&dir, threshold, limit, auto, dimensions).await,
    }
}
