//! Request and response types for the ballot client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Create poll request.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePollRequest {
    /// Poll title.
    pub title: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Option texts, at least two non-blank.
    pub options: Vec<String>,
    /// Optional expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Update poll request.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePollRequest {
    /// New poll title.
    pub title: String,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Cast vote request.
#[derive(Debug, Clone, Serialize)]
pub struct CastVoteRequest {
    /// The option to vote for.
    pub option_id: String,
}

/// A poll option.
#[derive(Debug, Clone, Deserialize)]
pub struct PollOption {
    /// Option ID.
    pub id: String,
    /// Option text.
    pub text: String,
}

/// A poll with its options.
#[derive(Debug, Clone, Deserialize)]
pub struct Poll {
    /// Poll ID.
    pub id: String,
    /// Poll title.
    pub title: String,
    /// Poll description, if any.
    pub description: Option<String>,
    /// Owner user ID.
    pub owner_id: String,
    /// Whether the poll currently accepts votes.
    pub is_active: bool,
    /// Expiry timestamp, if any.
    pub expires_at: Option<String>,
    /// Created timestamp.
    pub created_at: String,
    /// Last updated timestamp.
    pub updated_at: String,
    /// Options in supplied order.
    pub options: Vec<PollOption>,
}

/// Poll summary from the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PollSummary {
    /// Poll ID.
    pub id: String,
    /// Poll title.
    pub title: String,
    /// Poll description, if any.
    pub description: Option<String>,
    /// Owner user ID.
    pub owner_id: String,
    /// Expiry timestamp, if any.
    pub expires_at: Option<String>,
    /// Created timestamp.
    pub created_at: String,
}

/// An option with its vote count.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionTally {
    /// Option ID.
    pub id: String,
    /// Option text.
    pub text: String,
    /// Number of votes for this option.
    pub votes: u64,
}

/// Poll detail with tallies and the caller's own vote.
#[derive(Debug, Clone, Deserialize)]
pub struct PollDetail {
    /// Poll ID.
    pub id: String,
    /// Poll title.
    pub title: String,
    /// Poll description, if any.
    pub description: Option<String>,
    /// Owner user ID.
    pub owner_id: String,
    /// Whether the poll currently accepts votes.
    pub is_active: bool,
    /// Expiry timestamp, if any.
    pub expires_at: Option<String>,
    /// Created timestamp.
    pub created_at: String,
    /// Options with vote counts, in supplied order.
    pub options: Vec<OptionTally>,
    /// Total number of votes cast.
    pub total_votes: u64,
    /// The option the caller voted for, if any.
    pub your_vote: Option<String>,
}

/// Vote receipt.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteReceipt {
    /// The poll voted on.
    pub poll_id: String,
    /// The chosen option.
    pub option_id: String,
    /// When the vote was cast.
    pub voted_at: String,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}
