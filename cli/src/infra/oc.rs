//! Infrastructure implementation of the release and image inspection ports.
//!
//! `OcClient<R>` routes every `oc` call through a `CommandRunner`, so tests
//! can inject a recording runner without spawning real processes.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ImageSource, ReleaseSource};

/// `oc` CLI adapter.
pub struct OcClient<R: CommandRunner> {
    runner: R,
    binary: String,
}

impl<R: CommandRunner> OcClient<R> {
    /// Create a client that invokes `binary` (usually just `oc`).
    pub fn new(runner: R, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }
}

impl<R: CommandRunner> ReleaseSource for OcClient<R> {
    async fn release_info(&self, release_image: &str) -> Result<Output> {
        self.runner
            .run(
                &self.binary,
                &["adm", "release", "info", release_image, "-o", "json"],
            )
            .await
            .context("oc adm release info")
    }

    async fn image_for(&self, release_image: &str, component: &str) -> Result<Output> {
        let image_for = format!("--image-for={component}");
        self.runner
            .run(
                &self.binary,
                &["adm", "release", "info", release_image, &image_for],
            )
            .await
            .with_context(|| format!("oc adm release info --image-for={component}"))
    }
}

impl<R: CommandRunner> ImageSource for OcClient<R> {
    async fn image_info(&self, image_ref: &str) -> Result<Output> {
        self.runner
            .run(&self.binary, &["image", "info", image_ref, "-o", "json"])
            .await
            .context("oc image info")
    }
}
