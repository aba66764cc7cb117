mod chapters;
mod cli;
mod commands;
mod error;
mod mcp;
mod pdf;
mod selection;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Chapters { path, order, json } => {
            commands::chapters::run(&path, order, json)?;
        }
        Commands::Split {
            path,
            output_dir,
            order,
            select,
            dry_run,
        } => {
            let options = commands::split::SplitOptions {
                order,
                select,
                dry_run,
            };
            commands::split::run(&path, &output_dir, &options)?;
        }
    }

    Ok(())
}

// stdout belongs to command output and the MCP transport
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
