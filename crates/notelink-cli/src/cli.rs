//! Argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notelink", about = "Link notes by semantic similarity", version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory of Markdown notes and propose links
    Scan {
        /// Directory containing `.md` notes (file stem becomes the note id)
        dir: PathBuf,

        /// Minimum cosine similarity to propose a connection
        #[arg(short, long, default_value_t = 0.7)]
        threshold: f32,

        /// Maximum proposed connections per note
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Apply connections immediately instead of asking for approval
        #[arg(long)]
        auto: bool,

        /// Embedding vector dimensionality
        #[arg(long, default_value_t = 256)]
        dimensions: usize,
    },
}
