//! Per-component outcomes and the run tally.

use std::fmt;

/// Why a component never reached evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Unresolved,
    MetadataUnavailable,
    NoTimestamps,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unresolved => "image not resolved",
            Self::MetadataUnavailable => "image metadata unavailable",
            Self::NoTimestamps => "no build timestamps",
        })
    }
}

/// Terminal state of one component in a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentOutcome {
    Skipped(SkipReason),
    /// Younger than the threshold.
    Fresh { days: i64 },
    /// Stale, but no source URL or branch to rebuild from.
    MissingSource { days: i64 },
    Triggered {
        /// Branch of the last attempt.
        branch: String,
        attempts: u8,
        succeeded: bool,
    },
}

impl ComponentOutcome {
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::MissingSource { .. } | Self::Triggered { .. })
    }
}

/// Ordered record of every component processed in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub components: Vec<(String, ComponentOutcome)>,
}

impl ScanSummary {
    pub fn record(&mut self, component: &str, outcome: ComponentOutcome) {
        self.components.push((component.to_string(), outcome));
    }

    #[must_use]
    pub fn scanned(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn stale(&self) -> usize {
        self.components.iter().filter(|(_, o)| o.is_stale()).count()
    }

    #[must_use]
    pub fn triggered(&self) -> usize {
        self.components
            .iter()
            .filter(|(_, o)| matches!(o, ComponentOutcome::Triggered { .. }))
            .count()
    }

    /// Components whose rebuild trigger failed, including after a retry.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.components
            .iter()
            .filter(|(_, o)| {
                matches!(
                    o,
                    ComponentOutcome::Triggered {
                        succeeded: false,
                        ..
                    }
                )
            })
            .count()
    }

    #[must_use]
    pub fn outcome(&self, component: &str) -> Option<&ComponentOutcome> {
        self.components
            .iter()
            .find(|(name, _)| name == component)
            .map(|(_, o)| o)
    }
}
