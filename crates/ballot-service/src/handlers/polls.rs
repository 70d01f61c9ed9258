//! Poll management handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ballot_core::{Poll, PollDraft, PollId, PollOption, PollUpdate};
use ballot_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Poll option response.
#[derive(Debug, Serialize)]
pub struct OptionResponse {
    /// Option ID.
    pub id: String,
    /// Option text.
    pub text: String,
}

impl From<&PollOption> for OptionResponse {
    fn from(option: &PollOption) -> Self {
        Self {
            id: option.id.to_string(),
            text: option.text.clone(),
        }
    }
}

/// Poll response including its options.
#[derive(Debug, Serialize)]
pub struct PollResponse {
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
    /// Options in the order they were supplied.
    pub options: Vec<OptionResponse>,
}

impl PollResponse {
    fn from_parts(poll: &Poll, options: &[PollOption]) -> Self {
        Self {
            id: poll.id.to_string(),
            title: poll.title.clone(),
            description: poll.description.clone(),
            owner_id: poll.owner_id.to_string(),
            is_active: poll.is_active,
            expires_at: poll.expires_at.map(|t| t.to_rfc3339()),
            created_at: poll.created_at.to_rfc3339(),
            updated_at: poll.updated_at.to_rfc3339(),
            options: options.iter().map(OptionResponse::from).collect(),
        }
    }
}

/// Poll summary for list responses (no options).
#[derive(Debug, Serialize)]
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

impl From<&Poll> for PollSummary {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id.to_string(),
            title: poll.title.clone(),
            description: poll.description.clone(),
            owner_id: poll.owner_id.to_string(),
            expires_at: poll.expires_at.map(|t| t.to_rfc3339()),
            created_at: poll.created_at.to_rfc3339(),
        }
    }
}

/// Option with its vote count, for the poll detail view.
#[derive(Debug, Serialize)]
pub struct OptionTally {
    /// Option ID.
    pub id: String,
    /// Option text.
    pub text: String,
    /// Number of votes for this option.
    pub votes: u64,
}

/// Poll detail response with tallies and the caller's own vote.
#[derive(Debug, Serialize)]
pub struct PollDetailResponse {
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
    /// The option ID the caller voted for, if any.
    pub your_vote: Option<String>,
}

/// Create poll request.
#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    /// Poll title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Option texts; blanks are dropped, at least two must remain.
    pub options: Vec<String>,
    /// Optional expiry.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Update poll request.
#[derive(Debug, Deserialize)]
pub struct UpdatePollRequest {
    /// New poll title.
    pub title: String,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Create a new poll with its options.
pub async fn create_poll(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<CreatePollRequest>,
) -> Result<(StatusCode, Json<PollResponse>), ApiError> {
    // Validate before any write
    let draft = PollDraft::new(
        &body.title,
        body.description.as_deref(),
        &body.options,
        body.expires_at,
    )?;
    let PollDraft {
        title,
        description,
        options,
        expires_at,
    } = draft;

    let poll = Poll::new(auth.user_id, title, description, expires_at);
    state.store.insert_poll(&poll)?;

    let rows: Vec<PollOption> = options
        .into_iter()
        .map(|text| PollOption::new(poll.id, text))
        .collect();

    // Roll back the poll row if option insertion fails, so no option-less
    // poll remains visible.
    if let Err(e) = state.store.insert_poll_options(&rows) {
        tracing::error!(
            poll_id = %poll.id,
            error = %e,
            "Option insertion failed - rolling back poll"
        );
        if let Err(rollback_err) = state.store.delete_poll(&poll.id) {
            tracing::error!(
                poll_id = %poll.id,
                error = %rollback_err,
                "Failed to roll back poll after option insertion failure"
            );
        }
        return Err(e.into());
    }

    tracing::info!(
        poll_id = %poll.id,
        owner_id = %auth.user_id,
        options = rows.len(),
        "Poll created"
    );

    Ok((
        StatusCode::CREATED,
        Json(PollResponse::from_parts(&poll, &rows)),
    ))
}

/// List open polls, newest first.
pub async fn list_polls(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<Vec<PollSummary>>, ApiError> {
    let now = Utc::now();
    let polls = state.store.list_polls()?;

    let summaries = polls
        .iter()
        .filter(|poll| poll.is_open(now))
        .map(PollSummary::from)
        .collect();

    Ok(Json(summaries))
}

/// Get a poll with its options, tallies, and the caller's own vote.
pub async fn get_poll(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PollDetailResponse>, ApiError> {
    let poll_id = parse_poll_id(&id)?;

    let poll = state
        .store
        .get_poll(&poll_id)?
        .ok_or_else(|| ApiError::NotFound("poll not found".into()))?;

    let options = state.store.list_poll_options(&poll_id)?;
    let tallies = state.store.tally_votes(&poll_id)?;
    let your_vote = state
        .store
        .get_vote(&poll_id, &auth.user_id)?
        .map(|vote| vote.option_id.to_string());

    let option_tallies: Vec<OptionTally> = options
        .iter()
        .map(|option| OptionTally {
            id: option.id.to_string(),
            text: option.text.clone(),
            votes: tallies.get(&option.id).copied().unwrap_or(0),
        })
        .collect();
    let total_votes = option_tallies.iter().map(|o| o.votes).sum();

    Ok(Json(PollDetailResponse {
        id: poll.id.to_string(),
        title: poll.title.clone(),
        description: poll.description.clone(),
        owner_id: poll.owner_id.to_string(),
        is_active: poll.is_active,
        expires_at: poll.expires_at.map(|t| t.to_rfc3339()),
        created_at: poll.created_at.to_rfc3339(),
        options: option_tallies,
        total_votes,
        your_vote,
    }))
}

/// Update a poll's title and description (owner only).
pub async fn update_poll(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdatePollRequest>,
) -> Result<Json<PollResponse>, ApiError> {
    let poll_id = parse_poll_id(&id)?;

    let poll = state
        .store
        .get_poll(&poll_id)?
        .ok_or_else(|| ApiError::NotFound("poll not found".into()))?;

    poll.ensure_owned_by(&auth.user_id)?;

    let update = PollUpdate::new(&body.title, body.description.as_deref())?;
    let updated = state.store.update_poll(&poll_id, &update)?;
    let options = state.store.list_poll_options(&poll_id)?;

    tracing::info!(poll_id = %poll_id, owner_id = %auth.user_id, "Poll updated");

    Ok(Json(PollResponse::from_parts(&updated, &options)))
}

/// Delete a poll with its options and votes (owner only).
pub async fn delete_poll(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let poll_id = parse_poll_id(&id)?;

    let poll = state
        .store
        .get_poll(&poll_id)?
        .ok_or_else(|| ApiError::NotFound("poll not found".into()))?;

    poll.ensure_owned_by(&auth.user_id)?;

    state.store.delete_poll_cascade(&poll_id)?;

    tracing::info!(poll_id = %poll_id, owner_id = %auth.user_id, "Poll deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Parse a poll ID from a path segment.
pub(crate) fn parse_poll_id(id: &str) -> Result<PollId, ApiError> {
    id.parse::<PollId>()
        .map_err(|_| ApiError::BadRequest("invalid poll id".into()))
}
