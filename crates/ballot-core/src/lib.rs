//! Core types and utilities for ballot.
//!
//! This crate provides the foundational types used throughout the ballot service:
//!
//! - **Identifiers**: `UserId`, `PollId`, `OptionId`, `VoteId`
//! - **Polls**: `Poll`, `PollOption`, `PollDraft`, `PollUpdate`
//! - **Votes**: `Vote`, the `admit_vote` admission check
//!
//! # Vote model
//!
//! Each authenticated user may cast **at most one vote per poll**. Votes are
//! immutable once cast and only disappear when their poll is deleted.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod poll;
pub mod vote;

pub use error::{PollError, Result};
pub use ids::{IdError, OptionId, PollId, UserId, VoteId};
pub use poll::{Poll, PollDraft, PollOption, PollUpdate, MIN_POLL_OPTIONS};
pub use vote::{admit_vote, Vote};
