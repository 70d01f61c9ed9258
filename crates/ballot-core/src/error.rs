//! Error types for ballot domain operations.

use crate::ids::IdError;

/// Result type for ballot domain operations.
pub type Result<T> = std::result::Result<T, PollError>;

/// Errors that can occur in ballot domain operations.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// Poll title is empty after trimming.
    #[error("poll title must not be empty")]
    TitleRequired,

    /// Fewer than the minimum number of usable options were supplied.
    #[error("a poll needs at least two options, got {supplied}")]
    NotEnoughOptions {
        /// Number of usable options after trimming and filtering.
        supplied: usize,
    },

    /// The caller does not own the poll.
    #[error("caller is not the owner of poll {poll_id}")]
    NotPollOwner {
        /// The poll ID.
        poll_id: String,
    },

    /// The option does not belong to the poll.
    #[error("option {option_id} does not belong to poll {poll_id}")]
    OptionNotInPoll {
        /// The option ID.
        option_id: String,
        /// The poll ID.
        poll_id: String,
    },

    /// The poll is closed to new votes.
    #[error("poll {poll_id} is closed")]
    PollClosed {
        /// The poll ID.
        poll_id: String,
    },

    /// The voter has already voted on this poll.
    #[error("voter {voter_id} has already voted on poll {poll_id}")]
    AlreadyVoted {
        /// The poll ID.
        poll_id: String,
        /// The voter's user ID.
        voter_id: String,
    },

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
