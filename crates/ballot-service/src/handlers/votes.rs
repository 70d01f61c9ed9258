//! Vote casting handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use ballot_core::{admit_vote, OptionId, Vote};
use ballot_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::polls::parse_poll_id;
use crate::state::AppState;

/// Cast vote request.
#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    /// The option to vote for.
    pub option_id: OptionId,
}

/// Cast vote response.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    /// The poll voted on.
    pub poll_id: String,
    /// The chosen option.
    pub option_id: String,
    /// When the vote was cast.
    pub voted_at: String,
}

/// Cast a vote on a poll.
///
/// One vote per voter per poll. The admission check rejects closed polls,
/// foreign options, and repeat voters; the vote key in the store is the
/// authoritative duplicate guard.
pub async fn cast_vote(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<CastVoteRequest>,
) -> Result<(StatusCode, Json<VoteResponse>), ApiError> {
    let poll_id = parse_poll_id(&id)?;

    let poll = state
        .store
        .get_poll(&poll_id)?
        .ok_or_else(|| ApiError::NotFound("poll not found".into()))?;

    let options = state.store.list_poll_options(&poll_id)?;
    let existing = state.store.get_vote(&poll_id, &auth.user_id)?;

    admit_vote(&poll, &options, &body.option_id, existing.as_ref(), Utc::now())?;

    let vote = Vote::new(poll_id, body.option_id, auth.user_id);
    state.store.insert_vote(&vote)?;

    tracing::info!(
        poll_id = %poll_id,
        option_id = %body.option_id,
        voter_id = %auth.user_id,
        "Vote cast"
    );

    Ok((
        StatusCode::CREATED,
        Json(VoteResponse {
            poll_id: vote.poll_id.to_string(),
            option_id: vote.option_id.to_string(),
            voted_at: vote.created_at.to_rfc3339(),
        }),
    ))
}
