//! External build commands such as `hugo --quiet --minify`.

use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;

use crate::traits::{BuildFailure, BuildResult, SiteBuilder};

/// Default build program.
pub const DEFAULT_PROGRAM: &str = "hugo";

/// Default build arguments.
pub const DEFAULT_ARGS: &[&str] = &["--quiet", "--minify"];

/// Default wall-clock limit for one build.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs an external program with the site root as its working directory.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandBuilder {
    /// Create a builder running `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// `hugo --quiet --minify` with a 30 second limit.
    pub fn hugo() -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            DEFAULT_ARGS.iter().map(|arg| arg.to_string()).collect(),
        )
    }

    /// Set the wall-clock limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn failed(&self, failure: BuildFailure, start: Instant) -> BuildResult {
        BuildResult::failed(
            failure,
            String::new(),
            String::new(),
            start.elapsed(),
            self.timeout,
        )
    }
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::hugo()
    }
}

#[async_trait]
impl SiteBuilder for CommandBuilder {
    fn name(&self) -> &str {
        &self.program
    }

    async fn build(&self, site_root: &Path) -> BuildResult {
        let start = Instant::now();

        tracing::debug!(
            "Running {} {} in {}",
            self.program,
            self.args.join(" "),
            site_root.display()
        );

        // A missing working directory also surfaces as NotFound from spawn
        if !site_root.is_dir() {
            return self.failed(
                BuildFailure::SiteRootMissing(site_root.display().to_string()),
                start,
            );
        }

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .current_dir(site_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return self.failed(BuildFailure::NotFound(self.program.clone()), start);
            }
            Err(e) => {
                return self.failed(
                    BuildFailure::SpawnError {
                        program: self.program.clone(),
                        message: e.to_string(),
                    },
                    start,
                );
            }
        };

        // Dropping the child on timeout kills it
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return self.failed(
                    BuildFailure::SpawnError {
                        program: self.program.clone(),
                        message: e.to_string(),
                    },
                    start,
                );
            }
            Err(_) => {
                tracing::warn!(
                    "{} exceeded {}s in {}",
                    self.program,
                    self.timeout.as_secs_f64(),
                    site_root.display()
                );
                return self.failed(BuildFailure::TimedOut(self.timeout), start);
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            BuildResult::succeeded(stdout, stderr, start.elapsed(), self.timeout)
        } else {
            BuildResult::failed(
                BuildFailure::ExitStatus(output.status.code()),
                stdout,
                stderr,
                start.elapsed(),
                self.timeout,
            )
        }
    }
}
