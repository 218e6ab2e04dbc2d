//! In-process builder rendering a site with the built-in templates.
//!
//! Follows the same file contract as an external build tool: it reads
//! `config.toml` and `data/webstack.yml` from the site root and writes
//! `<publishDir>/index.html`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use webstack_gen::{NavigationCategory, SiteConfig};
use webstack_site::verify::INDEX_FILE;
use webstack_site::{CONFIG_FILE, NAVIGATION_FILE};

use crate::templates::TemplateEngine;
use crate::traits::{BuildFailure, BuildResult, SiteBuilder};

/// Errors that can occur while rendering a site.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to read {0}")]
    ReadError(String),

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Builds a site in-process using [`TemplateEngine`].
pub struct TemplateBuilder {
    templates: TemplateEngine,
    minify: bool,
}

impl TemplateBuilder {
    /// Create a builder that minifies its output.
    pub fn new() -> Result<Self, RenderError> {
        let templates =
            TemplateEngine::new().map_err(|e| RenderError::TemplateError(e.to_string()))?;

        Ok(Self {
            templates,
            minify: true,
        })
    }

    /// Enable or disable whitespace minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Render the site under `root`, returning the written index path.
    pub fn render_site(&self, root: &Path) -> Result<PathBuf, RenderError> {
        let config_path = root.join(CONFIG_FILE);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| RenderError::ReadError(format!("{}: {}", config_path.display(), e)))?;
        let config: SiteConfig = toml::from_str(&content).map_err(|e| RenderError::ParseError {
            path: config_path.display().to_string(),
            message: e.to_string(),
        })?;

        let categories = load_navigation(&root.join(NAVIGATION_FILE))?;

        let html = self
            .templates
            .render_index(&config, &categories)
            .map_err(|e| RenderError::TemplateError(e.to_string()))?;
        let html = if self.minify { minify_html(&html) } else { html };

        let publish_dir = root.join(&config.publish_dir);
        fs::create_dir_all(&publish_dir).map_err(|e| RenderError::WriteError(e.to_string()))?;

        let index = publish_dir.join(INDEX_FILE);
        fs::write(&index, html).map_err(|e| RenderError::WriteError(e.to_string()))?;

        Ok(index)
    }
}

#[async_trait]
impl SiteBuilder for TemplateBuilder {
    fn name(&self) -> &str {
        "template"
    }

    async fn build(&self, site_root: &Path) -> BuildResult {
        let start = Instant::now();

        match self.render_site(site_root) {
            Ok(index) => BuildResult::succeeded(
                format!("Rendered {}\n", index.display()),
                String::new(),
                start.elapsed(),
                Duration::ZERO,
            ),
            Err(e) => BuildResult::failed(
                BuildFailure::RenderError(e.to_string()),
                String::new(),
                e.to_string(),
                start.elapsed(),
                Duration::ZERO,
            ),
        }
    }
}

/// A missing navigation file renders a site without navigation.
fn load_navigation(path: &Path) -> Result<Vec<NavigationCategory>, RenderError> {
    if !path.exists() {
        tracing::debug!("No navigation data at {}", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| RenderError::ReadError(format!("{}: {}", path.display(), e)))?;

    serde_yaml::from_str(&content).map_err(|e| RenderError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Drop indentation and blank lines.
fn minify_html(html: &str) -> String {
    html.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("")
}
