//! Error taxonomy for scaffold generation.
//!
//! Conflicts with existing files are not errors; they are resolved through the
//! confirmer. Everything here is terminal for the current run.
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type for scaffold operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The requested language is not a registered, non-group spec.
    #[error("unknown language {id:?} (expected one of: {})", known.join(", "))]
    InvalidLanguage { id: String, known: Vec<String> },

    /// A template file, fragment, or the template root itself is missing.
    #[error("missing template {}", path.display())]
    MissingTemplate { path: PathBuf },

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{tool} not found on PATH")]
    ToolMissing { tool: String },

    #[error("{tool} exited with {status}")]
    ToolFailed { tool: String, status: ExitStatus },

    #[error("prompt failed: {0}")]
    Prompt(String),

    /// The configuration table failed its startup validation.
    #[error("invalid language table: {0}")]
    Table(String),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl ScaffoldError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScaffoldError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Exit status the CLI reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScaffoldError::InvalidLanguage { .. } => 2,
            _ => 1,
        }
    }
}
