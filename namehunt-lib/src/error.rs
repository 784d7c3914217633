//! Error handling for the availability-checking pipeline.
//!
//! Per-domain probe failures never surface here; they are contained in
//! [`crate::AvailabilityStatus`] values. This type covers the failures that
//! can abort a run (bad input, missing credentials) and the non-fatal
//! upstream failures the generator and categorizer recover from.

use std::fmt;

/// Main error type for namehunt operations.
#[derive(Debug, Clone)]
pub enum NameHuntError {
    /// Empty or invalid input; reported before any network call
    InvalidInput { message: String },

    /// Network-related errors (connection, transport)
    Network {
        message: String,
        source: Option<String>,
    },

    /// An operation exceeded its timeout budget
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// A single probe failed against its backend
    Probe { domain: String, message: String },

    /// Response body could not be decoded
    Parse { message: String },

    /// Missing or invalid configuration (e.g. registrar credentials);
    /// fatal for the whole run
    Config { message: String },

    /// Name generation failed upstream; non-fatal, run ends gracefully
    Generation { message: String },

    /// Categorization failed upstream; non-fatal, fallback grouping applies
    Categorization { message: String },

    /// File I/O errors when reading domain lists
    File { path: String, message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl NameHuntError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    pub fn probe<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::Probe {
            domain: domain.into(),
            message: message.into(),
        }
    }

    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn generation<M: Into<String>>(message: M) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn categorization<M: Into<String>>(message: M) -> Self {
        Self::Categorization {
            message: message.into(),
        }
    }

    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::File {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole run.
    ///
    /// Only input validation and configuration failures are fatal; everything
    /// else degrades to a status value or a fallback.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::Config { .. })
    }
}

impl fmt::Display for NameHuntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            Self::Network { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Probe { domain, message } => {
                write!(f, "Probe error for '{}': {}", domain, message)
            }
            Self::Parse { message } => write!(f, "Parse error: {}", message),
            Self::Config { message } => write!(f, "Configuration error: {}", message),
            Self::Generation { message } => write!(f, "Name generation failed: {}", message),
            Self::Categorization { message } => write!(f, "Categorization failed: {}", message),
            Self::File { path, message } => write!(f, "File error at '{}': {}", path, message),
            Self::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for NameHuntError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for NameHuntError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(30))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for NameHuntError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<std::io::Error> for NameHuntError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}
