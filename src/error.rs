//! Error types and handling for `routecast`

use thiserror::Error;

/// Main error type for the `routecast` library
#[derive(Error, Debug)]
pub enum RoutecastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Network or HTTP transport failures when talking to the search backend
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The backend answered, but the body did not match the expected shape
    #[error("Invalid backend response: {message}")]
    InvalidResponse { message: String },

    /// Input validation errors (bad coordinates, missing identifiers)
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl RoutecastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message, suitable for an inline panel
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RoutecastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            RoutecastError::Transport { .. } => {
                "Unable to reach the search backend. Please check your connection and try again."
                    .to_string()
            }
            RoutecastError::InvalidResponse { .. } => {
                "The search backend returned an unexpected response. Please try again later."
                    .to_string()
            }
            RoutecastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}
