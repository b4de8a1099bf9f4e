//! Age formatting and the staleness threshold check.
//!
//! Pure functions only. The caller supplies `now`, so every result here is
//! reproducible in tests.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

/// Elapsed time since a component's most recent build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    elapsed: TimeDelta,
}

impl Age {
    /// Age of a build at `latest`, observed at `now`.
    ///
    /// A `latest` in the future (clock skew) gives a negative elapsed time,
    /// which formats in the seconds bucket and counts as zero days.
    #[must_use]
    pub fn between(latest: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            elapsed: now - latest,
        }
    }

    /// Age of the newest entry in `history`, or `None` for an empty history.
    #[must_use]
    pub fn of_latest(history: &[DateTime<Utc>], now: DateTime<Utc>) -> Option<Self> {
        history.iter().max().map(|latest| Self::between(*latest, now))
    }

    /// Whole days elapsed; zero below 24 hours.
    #[must_use]
    pub fn days(&self) -> i64 {
        elapsed_days(self.elapsed)
    }

    #[must_use]
    pub fn is_stale(&self, threshold_days: i64) -> bool {
        is_stale(self.days(), threshold_days)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_age(self.elapsed))
    }
}

/// Render an elapsed duration as `Ns`, `Nm`, `Nh`, or `Nd Nh`.
///
/// Each boundary (1 minute, 1 hour, 24 hours) belongs to the larger unit.
/// Values are truncated, never rounded.
#[must_use]
pub fn format_age(elapsed: TimeDelta) -> String {
    if elapsed < TimeDelta::minutes(1) {
        format!("{}s", elapsed.num_seconds())
    } else if elapsed < TimeDelta::hours(1) {
        format!("{}m", elapsed.num_minutes())
    } else if elapsed < TimeDelta::hours(24) {
        format!("{}h", elapsed.num_hours())
    } else {
        let hours = elapsed.num_hours();
        format!("{}d {}h", hours / 24, hours % 24)
    }
}

/// Whole days in `elapsed`: zero below 24 hours, else `floor(hours / 24)`.
#[must_use]
pub fn elapsed_days(elapsed: TimeDelta) -> i64 {
    if elapsed < TimeDelta::hours(24) {
        0
    } else {
        elapsed.num_hours() / 24
    }
}

/// A component is stale once its age in days reaches the threshold.
#[must_use]
pub fn is_stale(days: i64, threshold_days: i64) -> bool {
    days >= threshold_days
}
