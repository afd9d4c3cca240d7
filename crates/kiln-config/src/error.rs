//! Error types for manifest loading and build plan resolution.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Every way a resolution call can fail.
///
/// Errors are terminal for the call that produced them and are surfaced
/// unchanged by the plan assembler, so the variant identifies the stage.
#[derive(Debug, Error)]
pub enum ConfigError {
    // Manifest loader
    #[error("malformed manifest at '{field}': {message}")]
    MalformedManifest { field: String, message: String },

    // Mode resolver
    #[error("invalid mode '{value}': expected 'development' or 'production'")]
    InvalidMode { value: String },

    // Entry resolver
    #[error("no entries found for '{name}'")]
    NoEntriesFound { name: String },

    #[error("entry path not found: {}", path.display())]
    EntryNotFound { path: PathBuf },

    // Rule table builder (also raised for unparsable entry globs)
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // Plan assembler
    #[error("incomplete configuration: missing {part}")]
    IncompleteConfiguration { part: &'static str },

    // Discovery
    #[error("no kiln manifest found in {}", root.display())]
    NotFound { root: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedManifest {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }
}
