use crate::chapters::Order;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-chapters")]
#[command(about = "Split a PDF into one file per chapter using its bookmarks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// List the chapters a split would produce
    #[command(alias = "toc")]
    Chapters {
        /// PDF file to inspect
        path: PathBuf,

        /// Order chapters are numbered in
        #[arg(long, value_enum, default_value_t = Order::Ascending)]
        order: Order,

        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Write each chapter to its own PDF
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Output directory (created if missing)
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Order of the output files
        #[arg(long, value_enum, default_value_t = Order::Ascending)]
        order: Order,

        /// Chapters to write, by number after ordering (e.g., "1-3,7,9-end")
        #[arg(short, long)]
        select: Option<String>,

        /// Print the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,
    },
}
