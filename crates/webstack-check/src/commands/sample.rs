//! Draw one trial input and write its artifacts for inspection.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::Config as ProptestConfig;
use webstack_gen::{trial_input, GenerationBounds};
use webstack_site::{write_site, CONFIG_FILE, NAVIGATION_FILE};

use crate::config::ConfigFile;
use crate::driver::seeded_runner;

/// Run the sample command.
pub async fn run(file_config: &ConfigFile, seed: Option<u64>, output: PathBuf) -> Result<()> {
    let seed = seed.or(file_config.check.seed);
    let mut runner = seeded_runner(ProptestConfig::default(), seed);

    let input = trial_input(GenerationBounds::default())
        .new_tree(&mut runner)
        .map_err(|e| anyhow::anyhow!("Failed to draw trial input: {}", e))?
        .current();

    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_site(&output, &input.site_config(), input.navigation())
        .context("Failed to write site artifacts")?;

    tracing::info!(
        "Sampled '{}' by '{}' with {} categories",
        input.title,
        input.author,
        input.categories.len()
    );
    tracing::info!("Wrote {}", output.join(CONFIG_FILE).display());
    tracing::info!("Wrote {}", output.join(NAVIGATION_FILE).display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_reproducible_sample() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        let config = ConfigFile::default();

        run(&config, Some(3), first.path().to_path_buf()).await.unwrap();
        run(&config, Some(3), second.path().to_path_buf()).await.unwrap();

        let a = fs::read_to_string(first.path().join(CONFIG_FILE)).unwrap();
        let b = fs::read_to_string(second.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(a, b);
        assert!(second.path().join(NAVIGATION_FILE).exists());
    }
}
