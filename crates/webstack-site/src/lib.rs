//! Scratch site workspaces, artifact writers and output verification.
//!
//! Everything here takes an explicit site root; nothing touches the process
//! working directory.

pub mod verify;
pub mod workspace;
pub mod writer;

pub use verify::{verify_site, VerificationFailure, VerificationOutcome};
pub use workspace::{EnvironmentError, SiteWorkspace, WorkspaceOptions};
pub use writer::{write_site, ArtifactError, CONFIG_FILE, NAVIGATION_FILE};
