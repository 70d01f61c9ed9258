//! Client error types.

/// Errors that can occur when using the ballot client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Poll or resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller does not own the poll.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Vote or update conflicts with current poll state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Request was rejected by validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
