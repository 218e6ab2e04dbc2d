//! Property check command.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use webstack_build::{CommandBuilder, SiteBuilder, TemplateBuilder};
use webstack_site::WorkspaceOptions;

use crate::config::{BuilderKind, ConfigFile};
use crate::driver::{DriverOptions, PropertyDriver};

/// Options for the check command. Unset values fall back to the config file.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Number of trials to run
    #[arg(short = 'n', long)]
    trials: Option<u32>,

    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Builder to check
    #[arg(short, long, value_enum)]
    builder: Option<BuilderKind>,

    /// Build program for the command builder
    #[arg(long)]
    program: Option<String>,

    /// Build timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Theme directory copied into each trial's site
    #[arg(long)]
    theme_dir: Option<PathBuf>,

    /// Write a JSON report here when the property holds
    #[arg(long)]
    report: Option<PathBuf>,
}

/// Run the check command.
pub async fn run(file_config: ConfigFile, args: CheckArgs) -> Result<()> {
    let options = DriverOptions {
        trials: args.trials.unwrap_or(file_config.check.trials),
        seed: args.seed.or(file_config.check.seed),
        trial_timeout: Duration::from_secs(file_config.check.trial_timeout_secs),
        max_shrink_iters: file_config.check.max_shrink_iters,
        workspace: WorkspaceOptions {
            theme_dir: Some(
                args.theme_dir
                    .unwrap_or_else(|| PathBuf::from(&file_config.check.theme_dir)),
            ),
            ..Default::default()
        },
        ..Default::default()
    };

    let builder: Box<dyn SiteBuilder> = match args.builder.unwrap_or(file_config.build.builder) {
        BuilderKind::Command => {
            let program = args.program.unwrap_or(file_config.build.program);
            let timeout = args.timeout.unwrap_or(file_config.build.timeout_secs);
            Box::new(
                CommandBuilder::new(program, file_config.build.args)
                    .with_timeout(Duration::from_secs(timeout)),
            )
        }
        BuilderKind::Template => {
            Box::new(TemplateBuilder::new().context("Failed to load built-in templates")?)
        }
    };

    let driver = PropertyDriver::new(options, builder);

    // The driver blocks on its own runtime, so keep it off the async workers
    let report = tokio::task::spawn_blocking(move || driver.run())
        .await
        .context("Property driver panicked")??;

    tracing::info!(
        "Property holds: {} trials against {} in {}ms",
        report.trials,
        report.builder,
        report.duration_ms
    );

    if let Some(path) = args.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!("Report: {}", path.display());
    }

    Ok(())
}
