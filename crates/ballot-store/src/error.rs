//! Error types for ballot storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("not found")]
    NotFound,

    /// A vote already exists for this `(poll, voter)` pair.
    #[error("duplicate vote: poll={poll_id}, voter={voter_id}")]
    DuplicateVote {
        /// The poll ID.
        poll_id: String,
        /// The voter's user ID.
        voter_id: String,
    },
}
