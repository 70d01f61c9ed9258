//! Ballot Client SDK.
//!
//! This crate provides a client library for interacting with the ballot API.
//!
//! # Example
//!
//! ```no_run
//! use ballot_client::{BallotClient, CreatePollRequest};
//!
//! # async fn example() -> Result<(), ballot_client::ClientError> {
//! let client = BallotClient::new(
//!     "http://ballot.voting-system.svc:8080",
//!     "user-jwt",
//! );
//!
//! // Create a poll
//! let poll = client.create_poll(CreatePollRequest {
//!     title: "Favorite language?".to_string(),
//!     description: None,
//!     options: vec!["Rust".to_string(), "Go".to_string()],
//!     expires_at: None,
//! }).await?;
//!
//! // Vote on it
//! let receipt = client.cast_vote(&poll.id, &poll.options[0].id).await?;
//! println!("Voted at {}", receipt.voted_at);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{BallotClient, ClientOptions};
pub use error::ClientError;
pub use types::*;
