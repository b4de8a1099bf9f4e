//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::{Age, RebuildConfig, RebuildRequest, ScanSummary, TriggerError};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program to completion and capture its stdout, stderr, and status.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or waited on. A
    /// non-zero exit is not an error; callers inspect `Output::status`.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
}

/// Lets adapters borrow a runner owned elsewhere, e.g. a test's recorder.
impl<T: CommandRunner> CommandRunner for &T {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        (**self).run(program, args).await
    }
}

// ── Collaborator Ports ────────────────────────────────────────────────────────

/// Release payload inspection (`oc adm release info`).
#[allow(async_fn_in_trait)]
pub trait ReleaseSource {
    /// Full release description as JSON.
    async fn release_info(&self, release_image: &str) -> Result<Output>;
    /// Pullable image reference of one component.
    async fn image_for(&self, release_image: &str, component: &str) -> Result<Output>;
}

/// Image metadata inspection (`oc image info`).
#[allow(async_fn_in_trait)]
pub trait ImageSource {
    /// Image configuration, history, and labels as JSON.
    async fn image_info(&self, image_ref: &str) -> Result<Output>;
}

/// Kicks off a rebuild of one repository branch.
#[allow(async_fn_in_trait)]
pub trait RebuildTrigger {
    /// What gets invoked, e.g. the script path. Used in announcements.
    fn program(&self) -> &str;

    /// Run the trigger for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Failed`] with the captured output when the
    /// trigger exits non-zero.
    async fn trigger(&self, request: &RebuildRequest) -> Result<(), TriggerError>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading the settings file.
pub trait ConfigStore {
    /// Load settings, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<RebuildConfig>;
    /// Location the settings are read from.
    ///
    /// # Errors
    ///
    /// Returns an error if no location can be determined.
    fn path(&self) -> Result<std::path::PathBuf>;
}

// ── Clock Port ────────────────────────────────────────────────────────────────

/// Wall-clock source, swapped for a fixed instant in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts scan progress reporting so the service can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ScanReporter {
    /// Report an evaluated component: its age, source URL, and branch.
    fn component(&self, name: &str, age: &Age, vcs_url: &str, branch: &str);
    /// Report a component dropped before evaluation.
    fn skipped(&self, name: &str, reason: &str);
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Report a failed trigger attempt.
    fn failure(&self, message: &str);
    /// Called before the pause ahead of a trigger.
    fn wait_started(&self, delay: Duration);
    fn wait_finished(&self);
    /// Close the block printed for an evaluated component, triggered or not.
    fn separator(&self);
    /// Report the end-of-run tally.
    fn summary(&self, summary: &ScanSummary);
}
