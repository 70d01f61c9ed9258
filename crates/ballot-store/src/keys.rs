//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in column families.

use ballot_core::{OptionId, PollId, UserId};

/// Create a poll key from a poll ID.
///
/// ULID bytes sort chronologically, so forward iteration over the polls
/// column family yields oldest first.
#[must_use]
pub fn poll_key(poll_id: &PollId) -> Vec<u8> {
    poll_id.to_bytes().to_vec()
}

/// Create a poll option key from an option ID.
#[must_use]
pub fn option_key(option_id: &OptionId) -> Vec<u8> {
    option_id.as_bytes().to_vec()
}

/// Create an option index key.
///
/// Format: `poll_id (16 bytes) || position (4 bytes, big-endian) || option_id (16 bytes)`
///
/// The big-endian position keeps options in the order they were supplied at
/// poll creation.
#[must_use]
pub fn option_index_key(poll_id: &PollId, position: u32, option_id: &OptionId) -> Vec<u8> {
    let mut key = Vec::with_capacity(36);
    key.extend_from_slice(&poll_id.to_bytes());
    key.extend_from_slice(&position.to_be_bytes());
    key.extend_from_slice(option_id.as_bytes());
    key
}

/// Create a prefix for iterating all option index entries for a poll.
#[must_use]
pub fn poll_options_prefix(poll_id: &PollId) -> Vec<u8> {
    poll_id.to_bytes().to_vec()
}

/// Extract the option ID from an option index key.
///
/// # Panics
///
/// Panics if the key is not at least 36 bytes.
#[must_use]
pub fn extract_option_id_from_index_key(key: &[u8]) -> OptionId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[20..36]);
    OptionId::from_uuid(uuid::Uuid::from_bytes(bytes))
}

/// Create a vote key.
///
/// Format: `poll_id (16 bytes) || voter_id (16 bytes)`
///
/// One row can exist per `(poll, voter)` pair, which is what makes a second
/// vote by the same voter structurally impossible.
#[must_use]
pub fn vote_key(poll_id: &PollId, voter_id: &UserId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(&poll_id.to_bytes());
    key.extend_from_slice(voter_id.as_bytes());
    key
}

/// Create a prefix for iterating all votes for a poll.
#[must_use]
pub fn poll_votes_prefix(poll_id: &PollId) -> Vec<u8> {
    poll_id.to_bytes().to_vec()
}
