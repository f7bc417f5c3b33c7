//! Error types and handling infrastructure for logscope.
//!
//! Almost every failure in logscope is a user-input validation failure: an unsupported
//! file type, a duplicate import, an empty search term. These are reported back to the
//! caller synchronously and leave the session exactly as it was. The remaining variants
//! cover the terminal front end and configuration loading.

use thiserror::Error;

/// The main error type for logscope operations.
#[derive(Error, Debug)]
pub enum LogscopeError {
    /// Imported file does not carry an accepted extension
    #[error("Only .log and .txt files are supported: {name}")]
    FileTypeUnsupported { name: String },

    /// A real source with this name is already loaded
    #[error("{name} is already imported")]
    DuplicateSource { name: String },

    /// Operation requires a real, active source
    #[error("Please select a log file first")]
    NoActiveSource,

    /// Search, mass search or replace was triggered without a term
    #[error("Please enter a search term")]
    EmptySearchTerm,

    /// Replace has no target source
    #[error("No log file is selected for replacement")]
    NoSourceSelected,

    /// Mass search was triggered with nothing checked
    #[error("Please check at least one log file")]
    NoSourceChecked,

    /// Export was requested while nothing is visible
    #[error("There is no visible content to export")]
    NoVisibleContent,

    /// File system related errors (file not found, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for logscope operations.
pub type Result<T> = std::result::Result<T, LogscopeError>;

impl LogscopeError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    pub fn file_type_unsupported(name: impl Into<String>) -> Self {
        Self::FileTypeUnsupported { name: name.into() }
    }

    pub fn duplicate_source(name: impl Into<String>) -> Self {
        Self::DuplicateSource { name: name.into() }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// True for failures the user fixes by adjusting input and retrying.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::FileTypeUnsupported { .. }
                | Self::DuplicateSource { .. }
                | Self::NoActiveSource
                | Self::EmptySearchTerm
                | Self::NoSourceSelected
                | Self::NoSourceChecked
                | Self::NoVisibleContent
        )
    }
}

// Automatic conversion from io::Error to LogscopeError
impl From<std::io::Error> for LogscopeError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::FileError {
            message: message.to_string(),
            source: err,
        }
    }
}
