//! Infrastructure implementation of the `RebuildTrigger` port.

use crate::application::ports::{CommandRunner, RebuildTrigger};
use crate::domain::{RebuildRequest, TriggerError};

/// Runs the postsubmit script as `<script> <vcs-url> <branch>`.
pub struct PostsubmitScript<R: CommandRunner> {
    runner: R,
    script: String,
}

impl<R: CommandRunner> PostsubmitScript<R> {
    pub fn new(runner: R, script: impl Into<String>) -> Self {
        Self {
            runner,
            script: script.into(),
        }
    }
}

impl<R: CommandRunner> RebuildTrigger for PostsubmitScript<R> {
    fn program(&self) -> &str {
        &self.script
    }

    async fn trigger(&self, request: &RebuildRequest) -> Result<(), TriggerError> {
        let output = self
            .runner
            .run(&self.script, &[&request.vcs_url, &request.branch])
            .await
            .map_err(|e| TriggerError::Spawn(format!("{e:#}")))?;
        if output.status.success() {
            return Ok(());
        }
        let combined = format!(
            "{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        Err(TriggerError::Failed {
            output: combined.trim().to_string(),
        })
    }
}
