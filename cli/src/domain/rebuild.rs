//! Rebuild eligibility and branch selection.

use crate::domain::config::BranchFallback;
use crate::domain::error::TriggerError;

/// Text the trigger script prints when a branch has no base commit.
pub const MISSING_BASE_SHA_MARKER: &str = " ❌ Failed to retrieve base SHA for branch";

/// Source repository and branch to rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildRequest {
    pub vcs_url: String,
    pub branch: String,
}

impl RebuildRequest {
    /// Build a request only for a stale component with both a source URL
    /// and a branch.
    #[must_use]
    pub fn for_component(stale: bool, vcs_url: &str, branch: &str) -> Option<Self> {
        if !stale || vcs_url.is_empty() || branch.is_empty() {
            return None;
        }
        Some(Self {
            vcs_url: vcs_url.to_string(),
            branch: branch.to_string(),
        })
    }

    /// Same repository, different branch.
    #[must_use]
    pub fn with_branch(&self, branch: &str) -> Self {
        Self {
            vcs_url: self.vcs_url.clone(),
            branch: branch.to_string(),
        }
    }
}

/// Branch used for a component: the run-wide override when one was given,
/// otherwise the branch the image was built from.
#[must_use]
pub fn effective_branch<'a>(branch_override: Option<&'a str>, commit_ref: &'a str) -> &'a str {
    match branch_override {
        Some(branch) if !branch.is_empty() => branch,
        _ => commit_ref,
    }
}

/// Branch to retry with after `err`, if the failure qualifies for the single
/// fallback attempt.
#[must_use]
pub fn retry_branch<'a>(
    fallback: &'a BranchFallback,
    request: &RebuildRequest,
    err: &TriggerError,
) -> Option<&'a str> {
    (err.is_missing_base_sha() && request.branch == fallback.from).then_some(fallback.to.as_str())
}
