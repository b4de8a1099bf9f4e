//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod image;
pub mod rebuild;
pub mod release;
pub mod scan;
pub mod staleness;

pub use config::{BranchFallback, RebuildConfig};
pub use error::{ComponentError, ReleaseError, TriggerError};
pub use image::ImageMetadata;
pub use rebuild::{RebuildRequest, effective_branch};
pub use release::ReleaseManifest;
pub use scan::{ComponentOutcome, ScanSummary, SkipReason};
pub use staleness::{Age, elapsed_days, format_age, is_stale};
