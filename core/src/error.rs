//! Error types for the KYC API client.
//!
//! # Design
//! Errors are classified but never translated: a non-2xx response keeps its
//! raw status and body, and transport failures keep the underlying message.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by `KycClient` and `KycApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// No complete response arrived within the configured timeout.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Connection, DNS or I/O failure before a response was received.
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }
}

/// Errors raised while building a `KycConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base URL must not be empty")]
    EmptyBaseUrl,

    #[error("invalid timeout '{0}': expected a positive number of milliseconds")]
    InvalidTimeout(String),
}
