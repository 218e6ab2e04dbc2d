//! Writers for the two artifacts a site build consumes.

use std::fs;
use std::path::{Path, PathBuf};

use webstack_gen::{NavigationCategory, SiteConfig};

/// Site configuration file, relative to the site root.
pub const CONFIG_FILE: &str = "config.toml";

/// Navigation data file, relative to the site root.
pub const NAVIGATION_FILE: &str = "data/webstack.yml";

/// Errors that can occur while writing artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Failed to serialize {path}: {message}")]
    SerializeError { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    WriteError { path: String, message: String },
}

/// Serialize `config` to `<root>/config.toml`, replacing any existing file.
pub fn write_config(root: &Path, config: &SiteConfig) -> Result<PathBuf, ArtifactError> {
    let path = root.join(CONFIG_FILE);
    let content = toml::to_string(config).map_err(|e| ArtifactError::SerializeError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    write_file(&path, &content)?;
    tracing::debug!("Wrote {}", path.display());

    Ok(path)
}

/// Serialize `categories` to `<root>/data/webstack.yml`, replacing any existing file.
pub fn write_navigation(
    root: &Path,
    categories: &[NavigationCategory],
) -> Result<PathBuf, ArtifactError> {
    let path = root.join(NAVIGATION_FILE);
    let content = serde_yaml::to_string(categories).map_err(|e| ArtifactError::SerializeError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    write_file(&path, &content)?;
    tracing::debug!(
        "Wrote {} categories to {}",
        categories.len(),
        path.display()
    );

    Ok(path)
}

/// Write both artifacts for one site.
pub fn write_site(
    root: &Path,
    config: &SiteConfig,
    categories: &[NavigationCategory],
) -> Result<(), ArtifactError> {
    write_config(root, config)?;
    write_navigation(root, categories)?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<(), ArtifactError> {
    let to_error = |e: std::io::Error| ArtifactError::WriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)
}
