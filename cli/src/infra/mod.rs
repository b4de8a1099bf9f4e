//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the `oc`
//! and postsubmit collaborators, settings files, and the system clock.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod clock;
pub mod command_runner;
pub mod config;
pub mod oc;
pub mod postsubmit;
