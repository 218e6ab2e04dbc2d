//! Site configuration model and randomized input generators.
//!
//! This crate describes the configuration and navigation data a WebStack site
//! is built from, and provides proptest strategies that only produce valid,
//! unambiguously observable values.

pub mod model;
pub mod strategy;

pub use model::{AuthorInfo, NavigationCategory, NavigationLink, SiteConfig, SiteUrl, TrialInput};
pub use strategy::{trial_input, Alphabet, CountBounds, GenerationBounds, TextBounds};
