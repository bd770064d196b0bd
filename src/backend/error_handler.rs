//! Classification of backend failures for display and logging

use crate::backend::error::BackendError;
use crate::logging::LogLevel;

/// Decides how loudly a backend failure is reported and how it reads to the user.
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn new() -> Self {
        Self
    }

    /// Classify error and determine appropriate log level
    pub fn classify_error(&self, error: &BackendError) -> LogLevel {
        match error {
            // Missing records are routine when a listing was deleted meanwhile
            BackendError::Http { status: 404, .. } => LogLevel::Info,

            // Server errors - temporary issues
            BackendError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Authentication errors - critical
            BackendError::Http {
                status: 401 | 403, ..
            } => LogLevel::Error,

            // A body we cannot read means the contract changed
            BackendError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            BackendError::Reqwest(_) => LogLevel::Warn,

            BackendError::Http { .. } => LogLevel::Warn,
        }
    }

    /// Short description without response bodies or reqwest internals.
    pub fn describe(&self, error: &BackendError) -> String {
        match error {
            BackendError::Http { status: 404, .. } => "not found (HTTP 404)".to_string(),
            BackendError::Http { status, .. } => format!("server returned HTTP {}", status),
            BackendError::Decode(_) => "unexpected response from server".to_string(),
            BackendError::Reqwest(e) if e.is_timeout() => "request timed out".to_string(),
            BackendError::Reqwest(e) if e.is_connect() => "backend unreachable".to_string(),
            BackendError::Reqwest(_) => "network error".to_string(),
        }
    }
}
