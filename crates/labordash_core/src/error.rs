//! Core error types for the dashboard.

use std::fmt;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A metric referenced by the layout is absent from the snapshot
    MissingMetric {
        /// Metric key that was looked up
        key: String,
    },

    /// A metric value cannot be used (non-finite, wrong shape)
    InvalidMetric {
        /// Metric key
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Parse error
    ParseError {
        /// Error message
        message: String,
    },

    /// I/O failure while reading an input file
    Io {
        /// Path being accessed
        path: String,
        /// Underlying error message
        message: String,
    },
}

impl CoreError {
    /// Build an I/O error for a path
    #[must_use]
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMetric { key } => write!(f, "Metric not found in snapshot: {}", key),
            Self::InvalidMetric { key, reason } => {
                write!(f, "Invalid metric {}: {}", key, reason)
            }
            Self::ParseError { message } => write!(f, "Parse error: {}", message),
            Self::Io { path, message } => write!(f, "I/O error on {}: {}", path, message),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: err.to_string(),
        }
    }
}
