//! Application context — settings and output state shared by command handlers.
//!
//! `AppContext` is built once in `Cli::run()` from the settings file and the
//! top-level flags, then passed as `&AppContext` to the command.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::RebuildConfig;
use crate::output::OutputContext;

/// Output rendering flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

/// Settings given on the command line or through the environment.
/// Each one, when set, wins over the settings file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub oc_binary: Option<String>,
    pub trigger_script: Option<String>,
    pub trigger_delay_secs: Option<u64>,
    pub command_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut RebuildConfig) {
        if let Some(oc) = self.oc_binary {
            config.oc_binary = oc;
        }
        if let Some(script) = self.trigger_script {
            config.trigger_script = script;
        }
        if let Some(delay) = self.trigger_delay_secs {
            config.trigger_delay_secs = delay;
        }
        if self.command_timeout_secs.is_some() {
            config.command_timeout_secs = self.command_timeout_secs;
        }
    }
}

/// Flags passed from the top-level CLI to `AppContext::new`.
#[derive(Debug, Clone, Default)]
pub struct AppFlags {
    pub output: OutputFlags,
    pub overrides: ConfigOverrides,
}

/// Unified application context passed to the command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Effective settings after flags and environment are applied.
    pub config: RebuildConfig,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags and a settings store.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or parsed.
    pub fn new(flags: AppFlags, store: &impl ConfigStore) -> Result<Self> {
        let mut config = store.load()?;
        flags.overrides.apply(&mut config);
        tracing::debug!(?config, "effective settings");

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            config,
        })
    }
}
