//! Output formatting module

pub mod human;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use reporter::TerminalReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a plain line. Never suppressed; used for the per-component report.
    pub fn line(&self, msg: &str) {
        println!("{msg}");
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Never suppressed.
    pub fn warn(&self, msg: &str) {
        println!("  {} {msg}", "⚠".style(self.styles.warning));
    }

    /// Print a failure message prefixed with `✗`. Never suppressed.
    pub fn failure(&self, msg: &str) {
        println!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an in-progress step prefixed with `→`. Never suppressed.
    pub fn step(&self, msg: &str) {
        println!("  {} {msg}", "→".style(self.styles.info));
    }

    /// Print a dimmed rule. Suppressed when `quiet`.
    pub fn rule(&self, rule: &str) {
        if !self.quiet {
            println!("{}", rule.style(self.styles.dim));
        }
    }
}
