//! Skiff — static-site deploy CLI.
//!
//! # Usage
//!
//! ```text
//! skiff deploy [--config deploy.yaml] [--yes] [--strict-probe]
//! ```
//!
//! Walks the configured build directory, uploads every asset whose content
//! hash differs from the object already in S3, then invalidates the uploaded
//! paths on CloudFront. Unchanged assets are skipped; re-running against an
//! unchanged build uploads nothing.

mod commands;
mod console;
mod reporter;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::deploy::DeployArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "skiff",
    version,
    about = "Sync a static-site build to S3 and invalidate CloudFront",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload changed build assets and invalidate their CDN paths.
    Deploy(DeployArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Deploy(args) => args.run().await,
    }
}
