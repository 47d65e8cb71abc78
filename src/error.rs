//! Error types and handling for the trip planner

use thiserror::Error;

/// Main error type for the trip planner.
///
/// Validation and not-found outcomes carry their own variants so the HTTP
/// boundary can answer with specific status codes; everything coming from a
/// provider collapses into `Provider` and surfaces as a generic failure.
#[derive(Error, Debug)]
pub enum TripPlanError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Geocoding found no candidates for the requested location
    #[error("Location not found: {message}")]
    NotFound { message: String },

    /// Transport failures, non-success statuses or malformed payloads from
    /// an external provider
    #[error("Provider error: {message}")]
    Provider { message: String },
}

impl TripPlanError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TripPlanError {
    fn from(source: reqwest::Error) -> Self {
        Self::Provider {
            message: source.to_string(),
        }
    }
}
