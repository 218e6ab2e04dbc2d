//! Property driver: runs many randomized generate, build and verify trials.
//!
//! Each trial draws a [`TrialInput`], writes it into a fresh
//! [`SiteWorkspace`], builds it and verifies the output. Trials run one at a
//! time on a private current-thread runtime. The first failing trial is shrunk
//! by proptest to a minimal counterexample.

use std::cell::Cell;
use std::time::{Duration, Instant};

use proptest::test_runner::{
    Config as ProptestConfig, RngAlgorithm, TestCaseError, TestError, TestRng, TestRunner,
};
use serde::Serialize;

use webstack_build::{BuildResult, SiteBuilder};
use webstack_gen::{trial_input, GenerationBounds, TrialInput};
use webstack_site::{
    verify_site, write_site, ArtifactError, EnvironmentError, SiteWorkspace, WorkspaceOptions,
};

/// Default number of trials.
pub const DEFAULT_TRIALS: u32 = 100;

/// Default limit for one whole trial.
pub const DEFAULT_TRIAL_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of shrinking steps after a failure.
pub const DEFAULT_MAX_SHRINK_ITERS: u32 = 256;

/// Options for a property run.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Number of passing trials required
    pub trials: u32,

    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,

    /// Limit for one trial, build included
    pub trial_timeout: Duration,

    /// Shrinking steps allowed after a failure
    pub max_shrink_iters: u32,

    /// Size bounds for generated inputs
    pub bounds: GenerationBounds,

    /// How each trial's workspace is prepared
    pub workspace: WorkspaceOptions,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            trial_timeout: DEFAULT_TRIAL_TIMEOUT,
            max_shrink_iters: DEFAULT_MAX_SHRINK_ITERS,
            bounds: GenerationBounds::default(),
            workspace: WorkspaceOptions::default(),
        }
    }
}

/// Summary of a passing property run.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyReport {
    /// Builder the trials ran against
    pub builder: String,

    /// Trials that passed
    pub trials: u32,

    /// Seed, when one was fixed
    pub seed: Option<u64>,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

/// Errors that end a property run.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("Property failed on trial {trial} ({shrink_runs} shrink runs): {reason}\nMinimal failing input: {input:#?}")]
    Counterexample {
        reason: String,
        input: Box<TrialInput>,
        /// Trial number of the first failing input
        trial: u32,
        /// Builds run while shrinking after that trial
        shrink_runs: u32,
    },

    #[error("Property aborted: {0}")]
    Aborted(String),

    #[error("Failed to start runtime: {0}")]
    RuntimeError(String),
}

/// Why a single trial failed.
#[derive(Debug, thiserror::Error)]
enum TrialFailure {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error(transparent)]
    Artifacts(#[from] ArtifactError),

    #[error("Build failed: {}", .0.summary())]
    Build(Box<BuildResult>),

    #[error("Configuration verification failed: {0}")]
    Verification(String),

    #[error("Trial exceeded deadline of {}s", .0.as_secs_f64())]
    Deadline(Duration),
}

/// Runs the site fidelity property against one builder.
pub struct PropertyDriver {
    options: DriverOptions,
    builder: Box<dyn SiteBuilder>,
}

impl PropertyDriver {
    /// Create a driver.
    pub fn new(options: DriverOptions, builder: Box<dyn SiteBuilder>) -> Self {
        Self { options, builder }
    }

    /// Run every trial, stopping at the first failure.
    pub fn run(&self) -> Result<PropertyReport, PropertyError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| PropertyError::RuntimeError(e.to_string()))?;

        let mut runner = seeded_runner(self.proptest_config(), self.options.seed);
        let strategy = trial_input(self.options.bounds);
        let runs = Cell::new(0u32);
        let first_failure = Cell::new(None::<u32>);
        let start = Instant::now();

        if let Some(theme) = self.options.workspace.missing_theme() {
            tracing::warn!(
                "Theme directory not found: {}. The build may fail.",
                theme.display()
            );
        }

        tracing::info!(
            "Running {} trials against {}",
            self.options.trials,
            self.builder.name()
        );

        let result = runner.run(&strategy, |input| {
            runs.set(runs.get() + 1);
            runtime.block_on(self.run_trial(&input)).map_err(|e| {
                if first_failure.get().is_none() {
                    first_failure.set(Some(runs.get()));
                }
                tracing::debug!("Run {} failed: {}", runs.get(), e);
                TestCaseError::fail(e.to_string())
            })
        });

        match result {
            Ok(()) => {
                let report = PropertyReport {
                    builder: self.builder.name().to_string(),
                    trials: self.options.trials,
                    seed: self.options.seed,
                    duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                };
                tracing::info!(
                    "All {} trials passed in {}ms",
                    report.trials,
                    report.duration_ms
                );
                Ok(report)
            }
            Err(TestError::Fail(reason, input)) => {
                let trial = first_failure.get().unwrap_or(runs.get());
                let shrink_runs = runs.get() - trial;
                tracing::info!(
                    "Trial {} failed; shrunk over {} further runs",
                    trial,
                    shrink_runs
                );
                Err(PropertyError::Counterexample {
                    reason: reason.message().to_string(),
                    input: Box::new(input),
                    trial,
                    shrink_runs,
                })
            }
            Err(TestError::Abort(reason)) => {
                Err(PropertyError::Aborted(reason.message().to_string()))
            }
        }
    }

    fn proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.options.trials,
            max_shrink_iters: self.options.max_shrink_iters,
            failure_persistence: None,
            ..ProptestConfig::default()
        }
    }

    async fn run_trial(&self, input: &TrialInput) -> Result<(), TrialFailure> {
        let deadline = self.options.trial_timeout;
        tokio::time::timeout(deadline, self.check_site(input))
            .await
            .unwrap_or(Err(TrialFailure::Deadline(deadline)))
    }

    async fn check_site(&self, input: &TrialInput) -> Result<(), TrialFailure> {
        let config = input.site_config();

        // Removed on drop if anything below fails
        let workspace = SiteWorkspace::setup(&self.options.workspace)?;
        write_site(workspace.root(), &config, input.navigation())?;

        let build = self.builder.build(workspace.root()).await;
        if !build.success {
            return Err(TrialFailure::Build(Box::new(build)));
        }

        let outcome = verify_site(workspace.root(), &config, input.navigation());
        if !outcome.is_success() {
            return Err(TrialFailure::Verification(outcome.message()));
        }

        workspace.teardown()?;
        Ok(())
    }
}

/// A test runner seeded from `seed`, or from OS entropy when `None`.
pub fn seeded_runner(config: ProptestConfig, seed: Option<u64>) -> TestRunner {
    match seed {
        Some(seed) => {
            let mut bytes = [0u8; 32];
            bytes[..8].copy_from_slice(&seed.to_le_bytes());
            TestRunner::new_with_rng(config, TestRng::from_seed(RngAlgorithm::ChaCha, &bytes))
        }
        None => TestRunner::new(config),
    }
}
