//! Ballot HTTP API Service.
//!
//! This crate provides the HTTP API for the ballot service, including:
//!
//! - Poll creation, listing, update, and deletion
//! - Vote casting with one-vote-per-poll enforcement
//! - Per-option vote tallies
//!
//! # Authentication
//!
//! All `/v1` endpoints require a bearer JWT issued by the identity provider,
//! validated against its JWKS endpoint.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for the router signature

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
