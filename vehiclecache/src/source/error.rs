//! Error types for the remote vehicle source.

use thiserror::Error;

/// Errors that can occur when fetching vehicle locations upstream.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Upstream answered with a non-success status code.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// JSON deserialization failed.
    #[error("Failed to parse response: {0}")]
    JsonError(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Failure reported by a custom source implementation.
    #[error("{0}")]
    Other(String),
}
