//! Error types and handling for Bunkerwatch
//!
//! This module defines the error types used throughout the application.
//! Only configuration errors are fatal; every other variant is logged by the
//! check cycle and the scheduler keeps running.

use thiserror::Error;

/// Result type alias for Bunkerwatch operations
pub type Result<T> = std::result::Result<T, BunkerwatchError>;

/// Main error type for Bunkerwatch
#[derive(Debug, Error)]
pub enum BunkerwatchError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Network-related errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Timeout errors
    #[error("Timeout error: {message}")]
    Timeout { message: String },

    /// Price API errors (non-success status, unexpected payload)
    #[error("API error: {message}")]
    Api { message: String },

    /// Telegram delivery errors
    #[error("Notification error: {message}")]
    Notification { message: String },
}

impl BunkerwatchError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        BunkerwatchError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        BunkerwatchError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        BunkerwatchError::Io {
            message: message.into(),
        }
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        BunkerwatchError::Serialization {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        BunkerwatchError::Network {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        BunkerwatchError::Timeout {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        BunkerwatchError::Api {
            message: message.into(),
        }
    }

    /// Create a new notification error
    pub fn notification<S: Into<String>>(message: S) -> Self {
        BunkerwatchError::Notification {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for BunkerwatchError {
    fn from(err: std::io::Error) -> Self {
        BunkerwatchError::io(err.to_string())
    }
}

impl From<serde_json::Error> for BunkerwatchError {
    fn from(err: serde_json::Error) -> Self {
        BunkerwatchError::serialization(err.to_string())
    }
}

impl From<reqwest::Error> for BunkerwatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BunkerwatchError::timeout(err.to_string())
        } else {
            BunkerwatchError::network(err.to_string())
        }
    }
}
