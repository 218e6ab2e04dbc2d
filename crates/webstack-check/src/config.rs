//! Configuration file (`webstack-check.toml`).

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub check: CheckSettings,
    #[serde(default)]
    pub build: BuildSettings,
}

/// `[check]` table: how the property runs.
#[derive(Debug, Deserialize)]
pub struct CheckSettings {
    #[serde(default = "default_trials")]
    pub trials: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_trial_timeout_secs")]
    pub trial_timeout_secs: u64,
    #[serde(default = "default_max_shrink_iters")]
    pub max_shrink_iters: u32,
    /// Theme directory copied into each trial's site
    #[serde(default = "default_theme_dir")]
    pub theme_dir: String,
}

/// `[build]` table: which builder runs.
#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default)]
    pub builder: BuilderKind,
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Builder selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuilderKind {
    /// Run an external build command
    #[default]
    Command,
    /// Render in-process with the built-in templates
    Template,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            seed: None,
            trial_timeout_secs: default_trial_timeout_secs(),
            max_shrink_iters: default_max_shrink_iters(),
            theme_dir: default_theme_dir(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            builder: BuilderKind::default(),
            program: default_program(),
            args: default_args(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_trials() -> u32 {
    crate::driver::DEFAULT_TRIALS
}
fn default_trial_timeout_secs() -> u64 {
    crate::driver::DEFAULT_TRIAL_TIMEOUT.as_secs()
}
fn default_max_shrink_iters() -> u32 {
    crate::driver::DEFAULT_MAX_SHRINK_ITERS
}
fn default_theme_dir() -> String {
    "themes".to_string()
}
fn default_program() -> String {
    webstack_build::command::DEFAULT_PROGRAM.to_string()
}
fn default_args() -> Vec<String> {
    webstack_build::command::DEFAULT_ARGS
        .iter()
        .map(|arg| arg.to_string())
        .collect()
}
fn default_timeout_secs() -> u64 {
    webstack_build::command::DEFAULT_TIMEOUT.as_secs()
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}
