//! Site builders.
//!
//! A [`SiteBuilder`] turns a site root holding `config.toml` and
//! `data/webstack.yml` into rendered output. [`CommandBuilder`] runs an
//! external tool such as Hugo; [`TemplateBuilder`] renders in-process with the
//! built-in templates.

pub mod command;
pub mod render;
pub mod templates;
pub mod traits;

pub use command::CommandBuilder;
pub use render::{RenderError, TemplateBuilder};
pub use templates::TemplateEngine;
pub use traits::{BuildFailure, BuildResult, SiteBuilder};
