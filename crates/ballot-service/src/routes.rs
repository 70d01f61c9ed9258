//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, polls, votes};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent requests for vote endpoints.
/// Voting spikes when a popular poll circulates, so it gets its own limit.
const VOTE_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent requests for general API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Polls (JWT auth)
/// - `POST /v1/polls` - Create a poll with options
/// - `GET /v1/polls` - List open polls, newest first
/// - `GET /v1/polls/:id` - Get a poll with options, tallies, and own vote
/// - `PUT /v1/polls/:id` - Update title/description (owner only)
/// - `DELETE /v1/polls/:id` - Delete poll, options, and votes (owner only)
///
/// ## Votes (JWT auth, own concurrency limit)
/// - `POST /v1/polls/:id/vote` - Cast a vote
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Vote routes carry their own concurrency limit
    let vote_routes = Router::new()
        .route("/", post(votes::cast_vote))
        .layer(ConcurrencyLimitLayer::new(VOTE_MAX_CONCURRENT_REQUESTS));

    // Create concurrency-limited API routes
    let api_routes = Router::new()
        .route("/polls", post(polls::create_poll).get(polls::list_polls))
        .route(
            "/polls/:id",
            get(polls::get_poll)
                .put(polls::update_poll)
                .delete(polls::delete_poll),
        )
        // Vote routes (with their own concurrency limit)
        .nest("/polls/:id/vote", vote_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API v1 routes (rate limited)
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
