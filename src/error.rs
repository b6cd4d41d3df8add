//! Error types for configuration snapshot operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Primary error type for the configuration manager.
#[derive(Error, Debug)]
pub enum XcmError {
    // Environment errors
    #[error("Unsupported environment: {}", reasons.join("; "))]
    EnvironmentUnsupported { reasons: Vec<String> },

    #[error("No desktop configuration found at: {path}")]
    LiveConfigMissing { path: String },

    // Snapshot errors
    #[error("{role} not found: {path}")]
    SourceNotFound { role: &'static str, path: String },

    #[error("Nothing available to restore")]
    NothingToRestore,

    #[error("Failed to {op} {}: {source}", path.display())]
    Storage {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Interaction errors
    #[error("Invalid option '{input}': choose a number between 1 and {max}")]
    InvalidSelection { input: String, max: usize },

    #[error("Operation cancelled")]
    UserCancelled,

    #[error("Interrupted by user")]
    Interrupted,

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl XcmError {
    /// Build a storage error for a failed filesystem operation on `path`.
    pub fn storage(op: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Storage {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Build a missing-source error for the named path role.
    pub fn source_not_found(role: &'static str, path: &Path) -> Self {
        Self::SourceNotFound {
            role,
            path: path.display().to_string(),
        }
    }

    /// Returns true if the error only aborts the current operation and the
    /// session can continue at the menu.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::NothingToRestore
                | Self::InvalidSelection { .. }
                | Self::UserCancelled
                | Self::Storage { .. }
        )
    }

    /// Returns true if the error means the session must not start at all.
    pub const fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            Self::EnvironmentUnsupported { .. } | Self::LiveConfigMissing { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::EnvironmentUnsupported { .. } => {
                Some("Run this tool from inside an XFCE session on Linux")
            }
            Self::LiveConfigMissing { .. } => {
                Some("Log into XFCE at least once so it creates its configuration")
            }
            Self::SourceNotFound { .. } => Some("Save your current configuration first"),
            Self::ConfigNotFound { .. } => Some("Check the path given to --config"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using XcmError.
pub type Result<T> = std::result::Result<T, XcmError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| XcmError::Other(format!("{}: {e}", f().into())))
    }
}
