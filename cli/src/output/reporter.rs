//! `TerminalReporter` — Presentation-layer implementation of `ScanReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ScanReporter`
//! trait so the scan service can emit progress events without depending on
//! any presentation type directly.

use std::cell::RefCell;
use std::time::Duration;

use indicatif::ProgressBar;

use crate::application::ports::ScanReporter;
use crate::domain::{Age, ScanSummary};
use crate::output::human::{SEPARATOR, format_component_line, format_skip_line, format_summary};
use crate::output::{OutputContext, progress};

/// Terminal scan reporter that wraps an `OutputContext`.
///
/// Component lines, skips, steps, and failures are always printed. The
/// separator and the summary are suppressed when `ctx.quiet`. The pause
/// before a trigger shows a spinner on stderr when attached to a TTY.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            spinner: RefCell::new(None),
        }
    }
}

impl ScanReporter for TerminalReporter<'_> {
    fn component(&self, name: &str, age: &Age, vcs_url: &str, branch: &str) {
        self.ctx
            .line(&format_component_line(name, age, vcs_url, branch));
    }

    fn skipped(&self, name: &str, reason: &str) {
        self.ctx.warn(&format_skip_line(name, reason));
    }

    fn step(&self, message: &str) {
        self.ctx.step(message);
    }

    fn failure(&self, message: &str) {
        self.ctx.failure(message);
    }

    fn wait_started(&self, delay: Duration) {
        if delay.is_zero() || !self.ctx.show_progress() {
            return;
        }
        let pb = progress::spinner(&format!(
            "waiting {}s before triggering rebuild",
            delay.as_secs()
        ));
        *self.spinner.borrow_mut() = Some(pb);
    }

    fn wait_finished(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    fn separator(&self) {
        self.ctx.rule(SEPARATOR);
    }

    fn summary(&self, summary: &ScanSummary) {
        if summary.failed() > 0 {
            self.ctx.warn(&format_summary(summary));
        } else {
            self.ctx.success(&format_summary(summary));
        }
    }
}
