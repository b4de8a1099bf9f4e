//! Domain types for release-rebuild configuration.
//!
//! Pure types only — no I/O, no async, no filesystem access.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_OC_BINARY: &str = "oc";
pub const DEFAULT_TRIGGER_SCRIPT: &str = "./os-postsubmit.sh";
pub const DEFAULT_TRIGGER_DELAY_SECS: u64 = 10;

// ── Config schema ────────────────────────────────────────────────────────────

/// Settings stored in `~/.config/release-rebuild/config.yaml`.
///
/// Every field is optional in the file; CLI flags and environment variables
/// take precedence over values read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebuildConfig {
    /// Release inspection CLI.
    pub oc_binary: String,
    /// Script invoked as `<script> <vcs-url> <branch>` for each stale component.
    pub trigger_script: String,
    /// Pause before each trigger invocation.
    pub trigger_delay_secs: u64,
    /// Kill collaborator processes that run longer than this. Unset means wait forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,
    pub fallback: BranchFallback,
}

impl Default for RebuildConfig {
    fn default() -> Self {
        Self {
            oc_binary: DEFAULT_OC_BINARY.to_string(),
            trigger_script: DEFAULT_TRIGGER_SCRIPT.to_string(),
            trigger_delay_secs: DEFAULT_TRIGGER_DELAY_SECS,
            command_timeout_secs: None,
            fallback: BranchFallback::default(),
        }
    }
}

impl RebuildConfig {
    #[must_use]
    pub fn trigger_delay(&self) -> Duration {
        Duration::from_secs(self.trigger_delay_secs)
    }

    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }
}

/// Branch alias retried once when the trigger cannot find a base SHA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchFallback {
    pub from: String,
    pub to: String,
}

impl Default for BranchFallback {
    fn default() -> Self {
        Self {
            from: "master".to_string(),
            to: "main".to_string(),
        }
    }
}
