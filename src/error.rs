//! Error handling module for theboys-setup
//!
//! Provides centralized error handling with proper error types using thiserror.
//! The sequencer converts any of these into the message carried by its
//! terminal `Completed` event, so `Display` output is user-facing.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the setup wizard
#[derive(Error, Debug)]
pub enum SetupError {
    /// The executable to install does not exist
    #[error("Executable not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// Target directory (or its nearest existing parent) is not writable
    #[error("Install directory is not writable: {}", .0.display())]
    Permission(PathBuf),

    /// A create/copy/chmod/symlink operation failed for OS reasons
    #[error("Failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Icon asset could not be decoded or encoded
    #[error("Failed to process icon {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The run was cancelled between steps
    #[error("Installation cancelled")]
    Cancelled,

    /// Validation errors (user input, config values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors (loading, parsing)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Install state machine transition errors
    #[error("Install transition error: {0}")]
    InstallTransition(String),

    /// IO errors not tied to a specific install step
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

impl SetupError {
    /// Wrap an IO error with the action and path it happened on
    pub fn filesystem(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create an install transition error
    pub fn install_transition(msg: impl Into<String>) -> Self {
        Self::InstallTransition(msg.into())
    }
}

/// Extension trait attaching an action and path to `io::Result`s
pub trait IoResultExt<T> {
    fn fs_context(self, action: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn fs_context(self, action: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| SetupError::filesystem(action, path, e))
    }
}
