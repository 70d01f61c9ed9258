//! `RocksDB` storage layer for ballot.
//!
//! This crate provides persistent storage for polls, options, and votes
//! using `RocksDB` with column families for efficient indexing.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `polls`: Primary poll records, keyed by `poll_id` (ULID)
//! - `poll_options`: Option records, keyed by `option_id`
//! - `options_by_poll`: Index preserving the supplied option order
//! - `votes`: Vote records, keyed by `poll_id || voter_id`
//!
//! # Example
//!
//! ```no_run
//! use ballot_store::{RocksStore, Store};
//! use ballot_core::{Poll, UserId};
//!
//! let store = RocksStore::open("/tmp/ballot-db").unwrap();
//!
//! // Create a poll
//! let owner = UserId::generate();
//! let poll = Poll::new(owner, "Favorite language?".into(), None, None);
//! store.insert_poll(&poll).unwrap();
//!
//! // Fetch it back
//! let retrieved = store.get_poll(&poll.id).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use std::collections::HashMap;

use ballot_core::{OptionId, Poll, PollId, PollOption, PollUpdate, UserId, Vote};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Poll Operations
    // =========================================================================

    /// Insert a poll record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_poll(&self, poll: &Poll) -> Result<()>;

    /// Get a poll by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_poll(&self, poll_id: &PollId) -> Result<Option<Poll>>;

    /// List all polls, ordered by creation time (newest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_polls(&self) -> Result<Vec<Poll>>;

    /// Apply a validated title/description update to a poll.
    ///
    /// Refreshes `updated_at` and returns the updated poll.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the poll doesn't exist.
    fn update_poll(&self, poll_id: &PollId, update: &PollUpdate) -> Result<Poll>;

    /// Delete a poll record only, leaving options and votes untouched.
    ///
    /// Used to roll back a freshly inserted poll when option insertion
    /// fails. Deleting a missing poll is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_poll(&self, poll_id: &PollId) -> Result<()>;

    // =========================================================================
    // Option Operations
    // =========================================================================

    /// Insert option records for a poll, preserving slice order.
    ///
    /// This also maintains the order index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_poll_options(&self, options: &[PollOption]) -> Result<()>;

    /// List a poll's options in the order they were supplied at creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_poll_options(&self, poll_id: &PollId) -> Result<Vec<PollOption>>;

    // =========================================================================
    // Vote Operations
    // =========================================================================

    /// Insert a vote.
    ///
    /// The vote key is `poll_id || voter_id`, so at most one vote can exist
    /// per `(poll, voter)` pair.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateVote` if the voter has already voted
    /// on this poll.
    fn insert_vote(&self, vote: &Vote) -> Result<()>;

    /// Get a voter's vote on a poll, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_vote(&self, poll_id: &PollId, voter_id: &UserId) -> Result<Option<Vote>>;

    /// Count votes per option for a poll.
    ///
    /// Options with no votes are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn tally_votes(&self, poll_id: &PollId) -> Result<HashMap<OptionId, u64>>;

    // =========================================================================
    // Compound Operations
    // =========================================================================

    /// Delete a poll together with its options and votes atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the poll doesn't exist.
    fn delete_poll_cascade(&self, poll_id: &PollId) -> Result<()>;
}
