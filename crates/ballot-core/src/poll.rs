//! Poll types for ballot.
//!
//! This module defines polls, their options, and the validated input drafts
//! used at creation and update time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PollError, Result};
use crate::ids::{OptionId, PollId, UserId};

/// Minimum number of usable options a poll must have.
pub const MIN_POLL_OPTIONS: usize = 2;

/// A poll created by a user.
///
/// The owner is the only user allowed to update or delete the poll. A poll
/// accepts votes while it is active and not past its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    /// The poll ID (time-ordered).
    pub id: PollId,

    /// Poll title, trimmed and non-empty.
    pub title: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// The user who created the poll. Immutable after creation.
    pub owner_id: UserId,

    /// Whether the poll currently accepts votes.
    pub is_active: bool,

    /// Optional expiry; votes are rejected after this instant.
    pub expires_at: Option<DateTime<Utc>>,

    /// When the poll was created.
    pub created_at: DateTime<Utc>,

    /// When the poll was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Poll {
    /// Create a new active poll from validated draft fields.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        title: String,
        description: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PollId::generate(),
            title,
            description,
            owner_id,
            is_active: true,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check that the caller owns this poll.
    ///
    /// # Errors
    ///
    /// Returns `PollError::NotPollOwner` if the caller is a different user.
    pub fn ensure_owned_by(&self, caller: &UserId) -> Result<()> {
        if self.owner_id == *caller {
            Ok(())
        } else {
            Err(PollError::NotPollOwner {
                poll_id: self.id.to_string(),
            })
        }
    }

    /// Check if the poll accepts votes at the given instant.
    #[must_use]
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at.map_or(true, |expiry| now < expiry)
    }
}

/// A choice belonging to a poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollOption {
    /// The option ID.
    pub id: OptionId,

    /// The poll this option belongs to.
    pub poll_id: PollId,

    /// Option text, trimmed and non-empty.
    pub text: String,

    /// When the option was created.
    pub created_at: DateTime<Utc>,
}

impl PollOption {
    /// Create a new option for a poll.
    #[must_use]
    pub fn new(poll_id: PollId, text: String) -> Self {
        Self {
            id: OptionId::generate(),
            poll_id,
            text,
            created_at: Utc::now(),
        }
    }
}

/// Validated input for creating a poll.
///
/// Construction trims the title and option texts, drops blank options, and
/// rejects drafts that end up with fewer than [`MIN_POLL_OPTIONS`] options.
#[derive(Debug, Clone)]
pub struct PollDraft {
    /// Trimmed, non-empty title.
    pub title: String,

    /// Trimmed description, `None` when blank.
    pub description: Option<String>,

    /// Usable option texts in supplied order.
    pub options: Vec<String>,

    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

impl PollDraft {
    /// Validate raw creation input into a draft.
    ///
    /// # Errors
    ///
    /// Returns `PollError::TitleRequired` if the title is blank and
    /// `PollError::NotEnoughOptions` if fewer than [`MIN_POLL_OPTIONS`]
    /// options remain after trimming.
    pub fn new(
        title: &str,
        description: Option<&str>,
        options: &[String],
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let title = trim_required(title).ok_or(PollError::TitleRequired)?;
        let description = description.and_then(trim_required);

        let options: Vec<String> = options
            .iter()
            .filter_map(|text| trim_required(text))
            .collect();
        if options.len() < MIN_POLL_OPTIONS {
            return Err(PollError::NotEnoughOptions {
                supplied: options.len(),
            });
        }

        Ok(Self {
            title,
            description,
            options,
            expires_at,
        })
    }
}

/// Validated input for updating a poll's title and description.
#[derive(Debug, Clone)]
pub struct PollUpdate {
    /// Trimmed, non-empty title.
    pub title: String,

    /// Trimmed description, `None` when blank.
    pub description: Option<String>,
}

impl PollUpdate {
    /// Validate raw update input.
    ///
    /// # Errors
    ///
    /// Returns `PollError::TitleRequired` if the title is blank.
    pub fn new(title: &str, description: Option<&str>) -> Result<Self> {
        let title = trim_required(title).ok_or(PollError::TitleRequired)?;
        let description = description.and_then(trim_required);
        Ok(Self { title, description })
    }
}

fn trim_required(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
