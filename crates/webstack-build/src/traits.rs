//! Trait definitions for site builders.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

/// Why a build did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildFailure {
    #[error("Build timed out after {}s", .0.as_secs_f64())]
    TimedOut(Duration),

    #[error("Build command '{0}' could not be found")]
    NotFound(String),

    #[error("Site root {0} is not a directory")]
    SiteRootMissing(String),

    #[error("Failed to run build command '{program}': {message}")]
    SpawnError { program: String, message: String },

    #[error("Build exited with status {}", .0.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    ExitStatus(Option<i32>),

    #[error("Failed to render site: {0}")]
    RenderError(String),
}

/// Result of one build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Whether the build succeeded (exit code 0, no timeout)
    pub success: bool,

    /// Exit code, when a process ran to completion
    pub exit_code: Option<i32>,

    /// Captured stdout
    pub stdout: String,

    /// Captured stderr
    pub stderr: String,

    /// Wall-clock time spent, in milliseconds
    pub duration_ms: u64,

    /// Timeout that applied to the build
    pub timeout: Duration,

    /// Failure classification, `None` on success
    pub failure: Option<BuildFailure>,
}

impl BuildResult {
    /// A successful build.
    pub fn succeeded(stdout: String, stderr: String, elapsed: Duration, timeout: Duration) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stdout,
            stderr,
            duration_ms: millis(elapsed),
            timeout,
            failure: None,
        }
    }

    /// A failed build. Captured streams are kept for diagnostics.
    pub fn failed(
        failure: BuildFailure,
        stdout: String,
        stderr: String,
        elapsed: Duration,
        timeout: Duration,
    ) -> Self {
        let exit_code = match failure {
            BuildFailure::ExitStatus(code) => code,
            _ => None,
        };

        Self {
            success: false,
            exit_code,
            stdout,
            stderr,
            duration_ms: millis(elapsed),
            timeout,
            failure: Some(failure),
        }
    }

    /// One-line description with the captured output attached.
    pub fn summary(&self) -> String {
        let status = match &self.failure {
            Some(failure) => failure.to_string(),
            None => "Build succeeded".to_string(),
        };
        format!("{}. Stdout: {}, Stderr: {}", status, self.stdout, self.stderr)
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// A build process that turns a site root into rendered output.
///
/// Implementations read `config.toml` and `data/webstack.yml` from the site
/// root and write the rendered site under the configured publish directory.
/// Every failure is reported through [`BuildResult`], never as a panic.
#[async_trait]
pub trait SiteBuilder: Send + Sync {
    /// Builder identifier (e.g., "hugo", "template")
    fn name(&self) -> &str;

    /// Build the site rooted at `site_root`.
    async fn build(&self, site_root: &Path) -> BuildResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_result_keeps_streams() {
        let result = BuildResult::failed(
            BuildFailure::ExitStatus(Some(255)),
            "partial".to_string(),
            "Error: template not found".to_string(),
            Duration::from_millis(40),
            Duration::from_secs(30),
        );

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(255));
        assert_eq!(
            result.summary(),
            "Build exited with status 255. Stdout: partial, Stderr: Error: template not found"
        );
    }

    #[test]
    fn not_found_has_no_exit_code() {
        let result = BuildResult::failed(
            BuildFailure::NotFound("hugo".to_string()),
            String::new(),
            String::new(),
            Duration::ZERO,
            Duration::from_secs(30),
        );

        assert_eq!(result.exit_code, None);
        assert!(result.summary().contains("could not be found"));
    }

    #[test]
    fn timeout_message_names_threshold() {
        let failure = BuildFailure::TimedOut(Duration::from_secs(30));

        assert_eq!(failure.to_string(), "Build timed out after 30s");
    }
}
