//! Application service — stale component rebuild use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! Components are processed strictly one after another: resolve, fetch
//! metadata, evaluate age, and trigger a rebuild when stale. Only the release
//! manifest lookup is fatal; every per-component failure is reported and the
//! scan moves on to the next component.

use std::process::Output;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::application::ports::{Clock, ImageSource, RebuildTrigger, ReleaseSource, ScanReporter};
use crate::domain::rebuild::retry_branch;
use crate::domain::{
    Age, BranchFallback, ComponentError, ComponentOutcome, ImageMetadata, RebuildRequest,
    ReleaseError, ReleaseManifest, ScanSummary, SkipReason, effective_branch,
};

/// Run-wide parameters, fixed once arguments are parsed.
#[derive(Debug, Clone)]
pub struct ScanRequest<'a> {
    pub release_image: &'a str,
    pub threshold_days: i64,
    /// Replaces every component's own branch when set.
    pub branch_override: Option<&'a str>,
    /// Pause before each trigger invocation.
    pub trigger_delay: Duration,
    pub fallback: &'a BranchFallback,
}

/// Scan every component of a release and trigger rebuilds for stale ones.
///
/// # Errors
///
/// Returns an error only when the release manifest cannot be read or parsed.
/// Per-component failures are reported through `reporter` and recorded in
/// the returned summary.
pub async fn scan_release(
    release: &impl ReleaseSource,
    images: &impl ImageSource,
    trigger: &impl RebuildTrigger,
    clock: &impl Clock,
    reporter: &impl ScanReporter,
    request: &ScanRequest<'_>,
) -> Result<ScanSummary, ReleaseError> {
    let manifest = inspect_release(release, request.release_image).await?;
    info!(
        release = request.release_image,
        components = manifest.len(),
        threshold_days = request.threshold_days,
        "release manifest loaded"
    );

    let mut summary = ScanSummary::default();
    for component in &manifest.components {
        let outcome = process_component(release, images, trigger, clock, reporter, request, component)
            .await;
        debug!(component = %component, outcome = ?outcome, "component done");
        summary.record(component, outcome);
    }

    reporter.summary(&summary);
    Ok(summary)
}

/// Fetch and parse the release manifest.
///
/// # Errors
///
/// Returns [`ReleaseError::InspectFailed`] carrying the collaborator's stderr
/// when it cannot be run or exits non-zero, and
/// [`ReleaseError::InvalidJson`] when its output does not parse.
pub async fn inspect_release(
    release: &impl ReleaseSource,
    release_image: &str,
) -> Result<ReleaseManifest, ReleaseError> {
    let output = release
        .release_info(release_image)
        .await
        .map_err(|e| ReleaseError::InspectFailed {
            image: release_image.to_string(),
            detail: format!("{e:#}"),
        })?;
    if !output.status.success() {
        return Err(ReleaseError::InspectFailed {
            image: release_image.to_string(),
            detail: failure_detail(&output),
        });
    }
    ReleaseManifest::parse(&output.stdout)
}

/// Resolve a component name to its pullable image reference.
///
/// # Errors
///
/// Returns [`ComponentError::ResolveFailed`] when the lookup fails and
/// [`ComponentError::EmptyReference`] when it prints nothing.
pub async fn resolve_component(
    release: &impl ReleaseSource,
    release_image: &str,
    component: &str,
) -> Result<String, ComponentError> {
    let output = release
        .image_for(release_image, component)
        .await
        .map_err(|e| ComponentError::ResolveFailed(format!("{e:#}")))?;
    if !output.status.success() {
        return Err(ComponentError::ResolveFailed(failure_detail(&output)));
    }
    let image_ref = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if image_ref.is_empty() {
        return Err(ComponentError::EmptyReference);
    }
    Ok(image_ref)
}

/// Fetch image metadata and make sure it carries at least one build timestamp.
///
/// # Errors
///
/// Returns [`ComponentError::MetadataFailed`] when the lookup fails,
/// [`ComponentError::InvalidMetadata`] when its JSON does not parse, and
/// [`ComponentError::NoTimestamps`] when no history entry has a valid date.
pub async fn fetch_metadata(
    images: &impl ImageSource,
    image_ref: &str,
) -> Result<ImageMetadata, ComponentError> {
    let output = images
        .image_info(image_ref)
        .await
        .map_err(|e| ComponentError::MetadataFailed(format!("{e:#}")))?;
    if !output.status.success() {
        return Err(ComponentError::MetadataFailed(failure_detail(&output)));
    }
    let metadata = ImageMetadata::parse(&output.stdout)?;
    if metadata.build_history.is_empty() {
        return Err(ComponentError::NoTimestamps);
    }
    Ok(metadata)
}

async fn process_component(
    release: &impl ReleaseSource,
    images: &impl ImageSource,
    trigger: &impl RebuildTrigger,
    clock: &impl Clock,
    reporter: &impl ScanReporter,
    request: &ScanRequest<'_>,
    component: &str,
) -> ComponentOutcome {
    let image_ref = match resolve_component(release, request.release_image, component).await {
        Ok(image_ref) => image_ref,
        Err(e) => return skip(reporter, component, SkipReason::Unresolved, &e),
    };

    let metadata = match fetch_metadata(images, &image_ref).await {
        Ok(metadata) => metadata,
        Err(e @ ComponentError::NoTimestamps) => {
            return skip(reporter, component, SkipReason::NoTimestamps, &e);
        }
        Err(e) => return skip(reporter, component, SkipReason::MetadataUnavailable, &e),
    };

    let Some(age) = Age::of_latest(&metadata.build_history, clock.now()) else {
        return skip(
            reporter,
            component,
            SkipReason::NoTimestamps,
            &ComponentError::NoTimestamps,
        );
    };
    let vcs_url = metadata.vcs_url();
    let branch = effective_branch(request.branch_override, metadata.commit_ref());
    reporter.component(component, &age, vcs_url, branch);

    let days = age.days();
    let stale = age.is_stale(request.threshold_days);
    let outcome = match RebuildRequest::for_component(stale, vcs_url, branch) {
        Some(rebuild) => {
            reporter.wait_started(request.trigger_delay);
            tokio::time::sleep(request.trigger_delay).await;
            reporter.wait_finished();
            run_trigger(trigger, reporter, &rebuild, request.fallback).await
        }
        None if stale => {
            debug!(component, vcs_url, branch, "stale but no source to rebuild");
            ComponentOutcome::MissingSource { days }
        }
        None => ComponentOutcome::Fresh { days },
    };
    reporter.separator();
    outcome
}

/// Invoke the trigger, retrying once on the fallback branch when the first
/// attempt could not find a base SHA.
async fn run_trigger(
    trigger: &impl RebuildTrigger,
    reporter: &impl ScanReporter,
    request: &RebuildRequest,
    fallback: &BranchFallback,
) -> ComponentOutcome {
    reporter.step(&format!(
        "Running {} {} {}",
        trigger.program(),
        request.vcs_url,
        request.branch
    ));

    let Err(err) = trigger.trigger(request).await else {
        return triggered(&request.branch, 1, true);
    };

    let Some(alt) = retry_branch(fallback, request, &err) else {
        warn!(vcs_url = %request.vcs_url, branch = %request.branch, error = %err, "rebuild trigger failed");
        reporter.failure(&format!("Rebuild trigger failed: {err}"));
        return triggered(&request.branch, 1, false);
    };

    reporter.step(&format!("Retrying with '{alt}' as fallback"));
    let retry = request.with_branch(alt);
    match trigger.trigger(&retry).await {
        Ok(()) => triggered(&retry.branch, 2, true),
        Err(err) => {
            warn!(vcs_url = %retry.vcs_url, branch = %retry.branch, error = %err, "fallback trigger failed");
            reporter.failure(&format!("Retry also failed: {err}"));
            triggered(&retry.branch, 2, false)
        }
    }
}

fn triggered(branch: &str, attempts: u8, succeeded: bool) -> ComponentOutcome {
    ComponentOutcome::Triggered {
        branch: branch.to_string(),
        attempts,
        succeeded,
    }
}

fn skip(
    reporter: &impl ScanReporter,
    component: &str,
    reason: SkipReason,
    err: &ComponentError,
) -> ComponentOutcome {
    warn!(component, reason = %reason, error = %err, "skipping component");
    reporter.skipped(component, &err.to_string());
    ComponentOutcome::Skipped(reason)
}

/// Exit status plus trimmed stderr of a failed collaborator call.
fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        format!("{}\n{stderr}", output.status)
    }
}
