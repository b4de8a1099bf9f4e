//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::app::{AppContext, AppFlags, ConfigOverrides, OutputFlags};
use crate::commands;
use crate::infra::config::YamlConfigStore;
use crate::logging::LogFormat;

/// Trigger rebuilds for stale component images in an OKD release
#[derive(Parser, Debug)]
#[command(name = "release-rebuild", version, allow_negative_numbers = true)]
pub struct Cli {
    #[command(flatten)]
    pub scan: commands::scan::ScanArgs,

    /// Settings file (default: ~/.config/release-rebuild/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the oc binary
    #[arg(long, value_name = "PATH", env = "RELEASE_REBUILD_OC")]
    pub oc: Option<String>,

    /// Script invoked as `<script> <vcs-url> <branch>` for each stale component
    #[arg(long, value_name = "PATH", env = "RELEASE_REBUILD_TRIGGER_SCRIPT")]
    pub trigger_script: Option<String>,

    /// Seconds to wait before each trigger invocation
    #[arg(long, value_name = "SECS", env = "RELEASE_REBUILD_TRIGGER_DELAY")]
    pub trigger_delay: Option<u64>,

    /// Kill oc or trigger processes running longer than this
    #[arg(long, value_name = "SECS", env = "RELEASE_REBUILD_COMMAND_TIMEOUT")]
    pub command_timeout: Option<u64>,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output (also disabled when NO_COLOR is set)
    #[arg(long)]
    pub no_color: bool,

    /// Log line format for diagnostics on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Execute the scan.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded or the release manifest
    /// cannot be read.
    pub async fn run(self) -> Result<()> {
        let Cli {
            scan,
            config,
            oc,
            trigger_script,
            trigger_delay,
            command_timeout,
            quiet,
            no_color,
            log_format: _,
        } = self;

        let store = YamlConfigStore::new(config);
        let flags = AppFlags {
            output: OutputFlags { no_color, quiet },
            overrides: ConfigOverrides {
                oc_binary: oc,
                trigger_script,
                trigger_delay_secs: trigger_delay,
                command_timeout_secs: command_timeout,
            },
        };
        let app = AppContext::new(flags, &store)?;
        commands::scan::run(&app, &scan).await
    }
}
