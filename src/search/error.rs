//! Error types exposed by the search layer.

use thiserror::Error;

/// Errors surfaced while composing clients or communicating with the search
/// upstream.
///
/// A stale response being discarded is not an error; it is normal control
/// flow inside the fetch orchestrator and never reaches this type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The API token was missing or blank.
    #[error("GitHub API token is required")]
    MissingToken,

    /// The API base URI could not be parsed or the client not constructed.
    #[error("search client configuration is invalid: {0}")]
    InvalidApiBase(String),

    /// The upstream search endpoint returned a non-success status.
    #[error("search upstream error: {message}")]
    Upstream {
        /// Response detail describing the failure.
        message: String,
    },

    /// Networking failed while calling the search upstream.
    #[error("network error talking to search upstream: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },
}
