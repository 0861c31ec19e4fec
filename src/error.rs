//! Error types for the rancher-ensure tools.
//!
//! This module provides the error hierarchy for every step of a run:
//! configuration loading, Rancher API calls, and reconciliation.

use std::path::PathBuf;
use thiserror::Error;

use crate::rancher::ResourceKind;

/// The main error type for the rancher-ensure tools.
#[derive(Debug, Error)]
pub enum RancherEnsureError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rancher API errors.
    #[error("Rancher API error: {0}")]
    Api(#[from] ApiError),

    /// Reconciliation errors.
    #[error("{0}")]
    Reconcile(#[from] ReconcileError),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file was not found.
    #[error("Settings file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The settings file could not be parsed.
    #[error("Failed to parse settings: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Settings validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// A required setting was given nowhere.
    #[error("Missing setting '{field}' (set it in the settings file, via {env_var}, or on the command line)")]
    MissingSetting {
        /// Settings file field.
        field: String,
        /// Environment variable that can provide it.
        env_var: String,
    },
}

/// Rancher API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Rancher authentication failed: {message}")]
    AuthenticationFailed {
        /// Description of the auth failure.
        message: String,
    },

    /// API request failed with a non-success status.
    #[error("Rancher API request failed: {status} - {message}")]
    ApiRequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The API answered with an error-typed body.
    #[error("Rancher rejected request for '{entity}': {body}")]
    Rejected {
        /// Name of the entity the request was about.
        entity: String,
        /// Raw response body.
        body: String,
    },

    /// Network error.
    #[error("Network error communicating with Rancher: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },

    /// Invalid response from API.
    #[error("Invalid response from Rancher API: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },
}

/// Reconciliation errors.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A resource that must pre-exist could not be resolved.
    #[error("{kind} '{name}' does not exist.")]
    NotFound {
        /// Kind of the missing resource.
        kind: ResourceKind,
        /// Name that was looked up.
        name: String,
    },
}

/// Result type alias for rancher-ensure operations.
pub type Result<T> = std::result::Result<T, RancherEnsureError>;

impl RancherEnsureError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error means a named resource is missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Reconcile(ReconcileError::NotFound { .. }))
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a missing-setting error.
    #[must_use]
    pub fn missing(field: impl Into<String>, env_var: impl Into<String>) -> Self {
        Self::MissingSetting {
            field: field.into(),
            env_var: env_var.into(),
        }
    }
}

impl ApiError {
    /// Creates an API request error.
    #[must_use]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiRequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates an invalid-response error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
