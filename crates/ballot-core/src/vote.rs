//! Vote types for ballot.
//!
//! A vote binds a voter to one option of one poll. Votes are immutable: once
//! cast they are never updated or deleted individually, only removed together
//! with their poll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PollError, Result};
use crate::ids::{OptionId, PollId, UserId, VoteId};
use crate::poll::{Poll, PollOption};

/// A vote cast by a user on a poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    /// The vote ID (time-ordered).
    pub id: VoteId,

    /// The poll voted on.
    pub poll_id: PollId,

    /// The chosen option.
    pub option_id: OptionId,

    /// The user who cast the vote.
    pub voter_id: UserId,

    /// When the vote was cast.
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new vote.
    #[must_use]
    pub fn new(poll_id: PollId, option_id: OptionId, voter_id: UserId) -> Self {
        Self {
            id: VoteId::generate(),
            poll_id,
            option_id,
            voter_id,
            created_at: Utc::now(),
        }
    }
}

/// Decide whether a vote may be cast.
///
/// Per `(poll, voter)` pair the state machine is Unvoted -> Voted, terminal.
/// Checks in order: the poll must be open, the option must belong to the
/// poll, and the voter must not have voted before.
///
/// # Errors
///
/// Returns `PollError::PollClosed`, `PollError::OptionNotInPoll`, or
/// `PollError::AlreadyVoted` when the corresponding check fails.
pub fn admit_vote(
    poll: &Poll,
    options: &[PollOption],
    option_id: &OptionId,
    existing: Option<&Vote>,
    now: DateTime<Utc>,
) -> Result<()> {
    if !poll.is_open(now) {
        return Err(PollError::PollClosed {
            poll_id: poll.id.to_string(),
        });
    }

    if !options.iter().any(|option| option.id == *option_id) {
        return Err(PollError::OptionNotInPoll {
            option_id: option_id.to_string(),
            poll_id: poll.id.to_string(),
        });
    }

    if let Some(vote) = existing {
        return Err(PollError::AlreadyVoted {
            poll_id: poll.id.to_string(),
            voter_id: vote.voter_id.to_string(),
        });
    }

    Ok(())
}
