//! Human-readable line formats for scan output.

use crate::domain::{Age, ScanSummary};

/// Rule printed after each evaluated component.
pub const SEPARATOR: &str = "==============================================================================================================================";

/// `Component: <name> created: <age> ago <vcs-url> <branch>`
#[must_use]
pub fn format_component_line(name: &str, age: &Age, vcs_url: &str, branch: &str) -> String {
    format!("Component: {name} created: {age} ago {vcs_url} {branch}")
}

#[must_use]
pub fn format_skip_line(name: &str, reason: &str) -> String {
    format!("Component: {name} skipped: {reason}")
}

#[must_use]
pub fn format_summary(summary: &ScanSummary) -> String {
    let triggered = summary.triggered();
    let noun = if triggered == 1 { "rebuild" } else { "rebuilds" };
    format!(
        "{} components scanned, {} stale, {triggered} {noun} triggered, {} failed",
        summary.scanned(),
        summary.stale(),
        summary.failed()
    )
}
