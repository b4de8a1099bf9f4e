//! Scan command — find stale release components and trigger their rebuilds.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::release_scan::{ScanRequest, scan_release};
use crate::infra::clock::SystemClock;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::oc::OcClient;
use crate::infra::postsubmit::PostsubmitScript;
use crate::output::TerminalReporter;

/// Positional arguments of a scan.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Release image to inspect (e.g. quay.io/okd/scos-release:4.15.0-0.okd-scos-2024-01-18-223523)
    pub release_image: String,

    /// Rebuild components whose newest build is at least this many days old
    #[arg(value_name = "TRIGGER_JOB_THRESHOLD_DAYS")]
    pub threshold_days: i64,

    /// Branch to rebuild for every component instead of each image's own commit ref
    #[arg(value_name = "RELEASE_BRANCH")]
    pub release_branch: Option<String>,

    /// Positionals after the branch are accepted and ignored.
    #[arg(hide = true, num_args = 0..)]
    pub ignored: Vec<String>,
}

impl ScanArgs {
    /// The branch override, treating an empty argument as absent.
    #[must_use]
    pub fn branch_override(&self) -> Option<&str> {
        self.release_branch.as_deref().filter(|b| !b.is_empty())
    }
}

/// Entry point for a scan.
///
/// # Errors
///
/// Returns an error if the release manifest cannot be read or parsed.
/// Failures of individual components are reported and do not fail the run.
pub async fn run(app: &AppContext, args: &ScanArgs) -> Result<()> {
    let runner = TokioCommandRunner::new(app.config.command_timeout());
    let oc = OcClient::new(runner, app.config.oc_binary.as_str());
    let postsubmit = PostsubmitScript::new(runner, app.config.trigger_script.as_str());
    let reporter = TerminalReporter::new(&app.output);

    let request = ScanRequest {
        release_image: &args.release_image,
        threshold_days: args.threshold_days,
        branch_override: args.branch_override(),
        trigger_delay: app.config.trigger_delay(),
        fallback: &app.config.fallback,
    };

    scan_release(&oc, &oc, &postsubmit, &SystemClock, &reporter, &request).await?;
    Ok(())
}
