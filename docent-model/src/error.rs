//! Error types for external model calls.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a hosted chat or embedding provider.
///
/// Every network, quota, decoding, or timeout failure of an external model
/// call is reported through this type. Nothing in the workspace retries on
/// these errors; the caller decides.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    /// The request could not be sent or the connection failed.
    #[error("Request error ({provider}): {message}")]
    Request {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The provider rejected the request.
    #[error("API error ({provider}): {message}")]
    Api {
        /// The provider that produced the error.
        provider: String,
        /// HTTP status code, when the client library exposes it.
        status: Option<u16>,
        /// Error detail extracted from the response body.
        message: String,
    },

    /// The response body or a stream event could not be decoded.
    #[error("Decode error ({provider}): {message}")]
    Decode {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The operation did not finish within its deadline.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// The operation that timed out (e.g. `"chat completion"`).
        operation: String,
        /// The deadline that was exceeded.
        after: Duration,
    },

    /// A required credential was not configured.
    #[error("Missing credential ({provider}): {variable} is not set")]
    MissingCredential {
        /// The provider requiring the credential.
        provider: String,
        /// The environment variable or setting that is missing.
        variable: String,
    },
}

impl ProviderError {
    /// Returns `true` for [`ProviderError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// A convenience result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
