//! webstack-check - property-based fidelity checks for WebStack site builds.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod driver;

#[derive(Parser)]
#[command(name = "webstack-check")]
#[command(about = "Check that generated site configuration shows up in the built site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to webstack-check.toml config file
    #[arg(short, long, default_value = "webstack-check.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run randomized build-and-verify trials
    Check(commands::check::CheckArgs),

    /// Write the artifacts of one generated site
    Sample {
        /// Seed for the drawn input
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory to write into
        #[arg(short, long, default_value = "sample-site")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let file_config = config::load_config(&cli.config)?;

    // Execute command
    match cli.command {
        Commands::Check(args) => {
            commands::check::run(file_config, args).await?;
        }
        Commands::Sample { seed, output } => {
            commands::sample::run(&file_config, seed, output).await?;
        }
    }

    Ok(())
}
