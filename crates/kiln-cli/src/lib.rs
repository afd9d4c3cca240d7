//! Kiln CLI - resolve asset bundler manifests into build plans.
//!
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status messages on stderr
//! - `commands` - `resolve` and `check`
//! - `settings` - figment-layered flags and `KILN_*` environment

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod settings;
pub mod ui;

pub use error::{CliError, Result};
