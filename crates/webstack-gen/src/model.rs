//! Site configuration and navigation data model.
//!
//! Field names serialize to the keys a WebStack Hugo site expects in
//! `config.toml` and `data/webstack.yml`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Locale tag written into every generated configuration.
pub const LANGUAGE_CODE: &str = "en-US";

/// Theme bundle the generated configuration points at.
pub const DEFAULT_THEME: &str = "WebStack-Hugo";

/// Directory the build writes its output into.
pub const DEFAULT_PUBLISH_DIR: &str = "public";

/// Directory holding link logos, relative to the site root.
pub const LOGOS_PATH: &str = "assets/images/logos";

/// URL schemes a generated URL may use.
pub const SCHEMES: &[&str] = &["http", "https"];

/// Hosts a generated URL may point at.
pub const HOSTS: &[&str] = &["example.com", "test.org", "demo.net", "site.io"];

/// Paths a generated URL may carry.
pub const PATHS: &[&str] = &["", "/", "/path", "/path/to/page"];

/// Icon tokens a category may carry.
pub const ICONS: &[&str] = &["fas fa-star", "fas fa-tools", "fas fa-book", "far fa-folder"];

/// Logo tokens a link may carry.
pub const LOGOS: &[&str] = &["default.webp", "github.png", "google.png", "test.png"];

/// Top-level site configuration (`config.toml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// Absolute base URL of the site
    #[serde(rename = "baseURL")]
    pub base_url: String,

    /// Locale tag
    pub language_code: String,

    /// Site title
    pub title: String,

    /// Theme bundle name
    pub theme: String,

    /// Keep taxonomy names as written
    pub preserve_taxonomy_names: bool,

    /// Keep path case as written
    pub disable_path_to_lower: bool,

    /// Output directory, relative to the site root
    pub publish_dir: String,

    /// Theme parameters, including the author block
    pub params: AuthorInfo,
}

impl SiteConfig {
    /// Build a configuration with the fixed locale, theme and feature flags.
    pub fn new(
        base_url: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            title: title.into(),
            params: AuthorInfo {
                author: author.into(),
                description: description.into(),
                ..AuthorInfo::default()
            },
            ..Self::default()
        }
    }

    /// The configured author, empty when none was supplied.
    pub fn author(&self) -> &str {
        &self.params.author
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            language_code: LANGUAGE_CODE.to_string(),
            title: String::new(),
            theme: DEFAULT_THEME.to_string(),
            preserve_taxonomy_names: true,
            disable_path_to_lower: true,
            publish_dir: DEFAULT_PUBLISH_DIR.to_string(),
            params: AuthorInfo::default(),
        }
    }
}

/// The `params` block: author details plus theme toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthorInfo {
    /// Author name
    pub author: String,

    /// Site description
    pub description: String,

    /// Show the preload animation
    pub enable_pre_load: bool,

    /// Start with the sidebar expanded
    pub expand_sidebar: bool,

    /// Directory holding link logos
    pub logos_path: String,

    /// Logo used when a link has none
    pub default_logo: String,

    /// Start in night mode
    pub night_mode: bool,

    /// Show the daily quote widget
    pub yiyan: bool,

    /// Enable the lightbox
    pub fancybox: bool,
}

impl Default for AuthorInfo {
    fn default() -> Self {
        Self {
            author: String::new(),
            description: String::new(),
            enable_pre_load: true,
            expand_sidebar: false,
            logos_path: LOGOS_PATH.to_string(),
            default_logo: format!("{}/{}", LOGOS_PATH, LOGOS[0]),
            night_mode: false,
            yiyan: true,
            fancybox: true,
        }
    }
}

/// One category of the navigation dataset (`data/webstack.yml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationCategory {
    /// Category name
    pub taxonomy: String,

    /// Icon token
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Links in this category
    #[serde(default)]
    pub links: Vec<NavigationLink>,
}

impl NavigationCategory {
    /// Create a category with the default icon.
    pub fn new(taxonomy: impl Into<String>, links: Vec<NavigationLink>) -> Self {
        Self {
            taxonomy: taxonomy.into(),
            icon: default_icon(),
            links,
        }
    }
}

/// One link inside a navigation category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationLink {
    /// Link title
    pub title: String,

    /// Logo token
    #[serde(default = "default_logo")]
    pub logo: String,

    /// Destination URL
    pub url: String,

    /// Free text, may be empty
    #[serde(default)]
    pub description: String,
}

impl NavigationLink {
    /// Create a link with the default logo and no description.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            logo: default_logo(),
            url: url.into(),
            description: String::new(),
        }
    }
}

fn default_icon() -> String {
    ICONS[0].to_string()
}

fn default_logo() -> String {
    LOGOS[0].to_string()
}

/// A URL restricted to the allowed schemes, hosts and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteUrl {
    /// One of [`SCHEMES`]
    pub scheme: &'static str,
    /// One of [`HOSTS`]
    pub host: &'static str,
    /// One of [`PATHS`]
    pub path: &'static str,
}

impl Default for SiteUrl {
    fn default() -> Self {
        Self {
            scheme: SCHEMES[0],
            host: HOSTS[0],
            path: PATHS[0],
        }
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.host, self.path)
    }
}

/// Everything drawn for a single trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialInput {
    /// Site base URL
    pub base_url: SiteUrl,
    /// Site title
    pub title: String,
    /// Author name
    pub author: String,
    /// Site description
    pub description: String,
    /// Navigation dataset, never empty
    pub categories: Vec<NavigationCategory>,
}

impl TrialInput {
    /// The configuration this input describes.
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig::new(
            self.base_url.to_string(),
            &self.title,
            &self.author,
            &self.description,
        )
    }

    /// The navigation dataset this input describes.
    pub fn navigation(&self) -> &[NavigationCategory] {
        &self.categories
    }
}
