//! Error handling for the kiln CLI.
//!
//! Resolution errors from `kiln-config` pass through untouched inside
//! [`CliError::Config`]; the rest covers settings, I/O and serialization.

use std::path::PathBuf;

use kiln_config::ConfigError;
use miette::Report;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Manifest loading or plan resolution failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Layered CLI settings could not be extracted
    #[error("invalid settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    /// Manifest file given with --config does not exist
    #[error("manifest file not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("failed to serialize build plan: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}

impl CliError {
    /// Short hint shown under the error, when one applies
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Config(ConfigError::MalformedManifest { .. }) => {
                Some("A manifest needs an `entry` mapping and an `output` mapping")
            }
            Self::Config(ConfigError::InvalidMode { .. }) => {
                Some("Use --mode development or --mode production")
            }
            Self::Config(ConfigError::NoEntriesFound { .. }) => {
                Some("Check that the entry globs match files under the manifest directory")
            }
            Self::Config(ConfigError::InvalidPattern { .. }) => {
                Some("Rule `test` and `exclude` values are regular expressions")
            }
            Self::Config(ConfigError::NotFound { .. }) => {
                Some("Create a kiln.toml or pass --config <FILE>")
            }
            _ => None,
        }
    }
}

/// Convert a CLI error into a miette report for display
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err.hint() {
        Some(hint) => miette::miette!(help = hint, "{}", err),
        None => miette::miette!("{}", err),
    }
}
