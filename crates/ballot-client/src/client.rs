//! Ballot HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, CastVoteRequest, CreatePollRequest, Poll, PollDetail, PollSummary,
    UpdatePollRequest, VoteReceipt,
};

/// Ballot API client.
///
/// Provides methods for managing polls and casting votes on behalf of an
/// authenticated user.
#[derive(Debug, Clone)]
pub struct BallotClient {
    client: Client,
    base_url: String,
    bearer_token: String,
}

impl BallotClient {
    /// Create a new ballot client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the ballot service (e.g., `"http://ballot:8080"`)
    /// * `bearer_token` - JWT for the acting user
    #[must_use]
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self::with_options(base_url, bearer_token, ClientOptions::default())
    }

    /// Create a new ballot client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with default settings).
    #[must_use]
    pub fn with_options(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        }
    }

    /// Create a poll with its options.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create_poll(&self, request: CreatePollRequest) -> Result<Poll, ClientError> {
        let url = format!("{}/v1/polls", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// List open polls, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_polls(&self) -> Result<Vec<PollSummary>, ClientError> {
        let url = format!("{}/v1/polls", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Get a poll with options, tallies, and the caller's own vote.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the poll doesn't exist.
    pub async fn get_poll(&self, poll_id: &str) -> Result<PollDetail, ClientError> {
        let url = format!("{}/v1/polls/{poll_id}", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Update a poll's title and description.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Forbidden` if the caller doesn't own the poll.
    pub async fn update_poll(
        &self,
        poll_id: &str,
        request: UpdatePollRequest,
    ) -> Result<Poll, ClientError> {
        let url = format!("{}/v1/polls/{poll_id}", self.base_url);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Delete a poll with its options and votes.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Forbidden` if the caller doesn't own the poll.
    pub async fn delete_poll(&self, poll_id: &str) -> Result<(), ClientError> {
        let url = format!("{}/v1/polls/{poll_id}", self.base_url);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let _: serde_json::Value = Self::handle_response(response).await?;
        Ok(())
    }

    /// Cast a vote on a poll.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Conflict` if the user already voted or the poll
    /// is closed, and `ClientError::InvalidRequest` if the option doesn't
    /// belong to the poll.
    pub async fn cast_vote(
        &self,
        poll_id: &str,
        option_id: impl Into<String>,
    ) -> Result<VoteReceipt, ClientError> {
        let url = format!("{}/v1/polls/{poll_id}/vote", self.base_url);
        let request = CastVoteRequest {
            option_id: option_id.into(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code;
                let message = api_error.error.message;

                match code.as_str() {
                    "not_found" => Err(ClientError::NotFound(message)),
                    "forbidden" => Err(ClientError::Forbidden(message)),
                    "conflict" => Err(ClientError::Conflict(message)),
                    "bad_request" => Err(ClientError::InvalidRequest(message)),
                    _ => Err(ClientError::Api {
                        code,
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
