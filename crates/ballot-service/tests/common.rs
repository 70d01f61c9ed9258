//! Common test utilities for ballot integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use ballot_core::{OptionId, Poll, PollId, PollOption, PollUpdate, UserId, Vote};
use ballot_service::{create_router, AppState, ServiceConfig};
use ballot_store::{RocksStore, Store, StoreError};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// A test user ID for authenticated requests.
    pub test_user_id: UserId,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RocksStore::open(temp_dir.path()).expect("Failed to open store");

        Self::from_store(Arc::new(store), temp_dir)
    }

    /// Create a harness whose store can be made to fail on demand.
    pub fn with_flaky_store() -> (Self, Arc<FlakyStore>) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = RocksStore::open(temp_dir.path()).expect("Failed to open store");
        let flaky = Arc::new(FlakyStore::new(store));

        let harness = Self::from_store(flaky.clone(), temp_dir);
        (harness, flaky)
    }

    fn from_store(store: Arc<dyn Store>, temp_dir: TempDir) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            auth_base_url: "http://localhost".into(),
            auth_audience: "ballot".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(store, config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");
        let test_user_id = UserId::generate();

        Self {
            server,
            _temp_dir: temp_dir,
            test_user_id,
        }
    }

    /// Get the authorization header for user authentication.
    pub fn user_auth_header(&self) -> String {
        format!("Bearer test-token:{}", self.test_user_id)
    }

    /// Get a different user's auth header (for testing isolation).
    pub fn other_user_auth_header() -> String {
        let other_user = UserId::generate();
        format!("Bearer test-token:{other_user}")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Store wrapper that can inject a one-shot failure into option insertion.
pub struct FlakyStore {
    inner: RocksStore,
    fail_insert_options: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: RocksStore) -> Self {
        Self {
            inner,
            fail_insert_options: AtomicBool::new(false),
        }
    }

    /// Make the next `insert_poll_options` call fail.
    pub fn fail_next_insert_options(&self) {
        self.fail_insert_options.store(true, Ordering::SeqCst);
    }
}

impl Store for FlakyStore {
    fn insert_poll(&self, poll: &Poll) -> Result<(), StoreError> {
        self.inner.insert_poll(poll)
    }

    fn get_poll(&self, poll_id: &PollId) -> Result<Option<Poll>, StoreError> {
        self.inner.get_poll(poll_id)
    }

    fn list_polls(&self) -> Result<Vec<Poll>, StoreError> {
        self.inner.list_polls()
    }

    fn update_poll(&self, poll_id: &PollId, update: &PollUpdate) -> Result<Poll, StoreError> {
        self.inner.update_poll(poll_id, update)
    }

    fn delete_poll(&self, poll_id: &PollId) -> Result<(), StoreError> {
        self.inner.delete_poll(poll_id)
    }

    fn insert_poll_options(&self, options: &[PollOption]) -> Result<(), StoreError> {
        if self.fail_insert_options.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Database("injected failure".into()));
        }
        self.inner.insert_poll_options(options)
    }

    fn list_poll_options(&self, poll_id: &PollId) -> Result<Vec<PollOption>, StoreError> {
        self.inner.list_poll_options(poll_id)
    }

    fn insert_vote(&self, vote: &Vote) -> Result<(), StoreError> {
        self.inner.insert_vote(vote)
    }

    fn get_vote(&self, poll_id: &PollId, voter_id: &UserId) -> Result<Option<Vote>, StoreError> {
        self.inner.get_vote(poll_id, voter_id)
    }

    fn tally_votes(&self, poll_id: &PollId) -> Result<HashMap<OptionId, u64>, StoreError> {
        self.inner.tally_votes(poll_id)
    }

    fn delete_poll_cascade(&self, poll_id: &PollId) -> Result<(), StoreError> {
        self.inner.delete_poll_cascade(poll_id)
    }
}
