//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::rebuild::MISSING_BASE_SHA_MARKER;

// ── Release errors ────────────────────────────────────────────────────────────

/// Fatal errors raised while reading the release manifest.
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Failed to get release info for {image}: {detail}")]
    InspectFailed { image: String, detail: String },

    #[error("Failed to parse release JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

// ── Component errors ──────────────────────────────────────────────────────────

/// Recoverable per-component errors. The scan logs these and moves on.
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("Could not resolve image: {0}")]
    ResolveFailed(String),

    #[error("Could not resolve image: empty image reference")]
    EmptyReference,

    #[error("Failed to get image info: {0}")]
    MetadataFailed(String),

    #[error("Failed to parse image info: {0}")]
    InvalidMetadata(#[from] serde_json::Error),

    #[error("No valid created timestamps found")]
    NoTimestamps,
}

// ── Trigger errors ────────────────────────────────────────────────────────────

/// Errors returned by the rebuild trigger collaborator.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// The script ran and exited non-zero. `output` is its trimmed stdout
    /// followed by its stderr.
    #[error("script error: {output}")]
    Failed { output: String },

    #[error("cannot run trigger script: {0}")]
    Spawn(String),
}

impl TriggerError {
    /// Whether the collaborator reported that it could not find a base SHA
    /// for the requested branch.
    ///
    /// Matched against the rendered message, so a marker at the very start of
    /// the script output still carries its leading space.
    #[must_use]
    pub fn is_missing_base_sha(&self) -> bool {
        match self {
            Self::Failed { .. } => self.to_string().contains(MISSING_BASE_SHA_MARKER),
            Self::Spawn(_) => false,
        }
    }
}
