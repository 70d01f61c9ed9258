//! Poll management integration tests.

mod common;

use axum::http::StatusCode;
use ballot_core::PollId;
use common::TestHarness;
use serde_json::json;

// ============================================================================
// Poll Creation
// ============================================================================

#[tokio::test]
async fn create_poll_success() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Favorite language?",
            "description": "Pick one",
            "options": [" Rust ", "Go", "  ", "Zig"],
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Favorite language?");
    assert_eq!(body["description"], "Pick one");
    assert_eq!(body["owner_id"], harness.test_user_id.to_string());
    assert_eq!(body["is_active"], true);

    // Blank option dropped, the rest trimmed and in supplied order
    let options = body["options"].as_array().unwrap();
    assert_eq!(options.len(), 3);
    assert_eq!(options[0]["text"], "Rust");
    assert_eq!(options[1]["text"], "Go");
    assert_eq!(options[2]["text"], "Zig");
}

#[tokio::test]
async fn create_poll_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/polls")
        .json(&json!({
            "title": "Favorite language?",
            "options": ["Rust", "Go"],
        }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn create_poll_with_blank_title_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "   ",
            "options": ["Rust", "Go"],
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn create_poll_with_too_few_options_fails() {
    let harness = TestHarness::new();

    // Only one usable option after blanks are dropped
    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Favorite language?",
            "options": ["Rust", "   ", ""],
        }))
        .await;

    response.assert_status_bad_request();

    // Nothing was persisted
    let response = harness
        .server
        .get("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_poll_rolls_back_when_option_insert_fails() {
    let (harness, flaky) = TestHarness::with_flaky_store();

    flaky.fail_next_insert_options();

    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Favorite language?",
            "options": ["Rust", "Go"],
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    // The poll row must not survive the failed option insert
    let response = harness
        .server
        .get("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

// ============================================================================
// Poll Listing
// ============================================================================

#[tokio::test]
async fn list_polls_newest_first() {
    let harness = TestHarness::new();

    for title in ["First", "Second", "Third"] {
        harness
            .server
            .post("/v1/polls")
            .add_header("authorization", harness.user_auth_header())
            .json(&json!({
                "title": title,
                "options": ["Yes", "No"],
            }))
            .await
            .assert_status(StatusCode::CREATED);

        // Poll IDs are time-ordered at millisecond precision
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let response = harness
        .server
        .get("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let polls = body.as_array().unwrap();
    assert_eq!(polls.len(), 3);
    assert_eq!(polls[0]["title"], "Third");
    assert_eq!(polls[1]["title"], "Second");
    assert_eq!(polls[2]["title"], "First");
}

#[tokio::test]
async fn list_polls_excludes_expired() {
    let harness = TestHarness::new();

    harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Still open",
            "options": ["Yes", "No"],
        }))
        .await
        .assert_status(StatusCode::CREATED);

    harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Already over",
            "options": ["Yes", "No"],
            "expires_at": "2020-01-01T00:00:00Z",
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = harness
        .server
        .get("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let polls = body.as_array().unwrap();
    assert_eq!(polls.len(), 1);
    assert_eq!(polls[0]["title"], "Still open");
}

#[tokio::test]
async fn list_polls_without_auth_fails() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/polls").await;

    response.assert_status_unauthorized();
}

// ============================================================================
// Get Poll
// ============================================================================

#[tokio::test]
async fn get_poll_returns_options_and_tallies() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Favorite language?",
            "options": ["Rust", "Go"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    let poll_id = created["id"].as_str().unwrap();

    let response = harness
        .server
        .get(&format!("/v1/polls/{poll_id}"))
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], poll_id);
    assert_eq!(body["total_votes"], 0);
    assert!(body["your_vote"].is_null());

    let options = body["options"].as_array().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0]["text"], "Rust");
    assert_eq!(options[0]["votes"], 0);
    assert_eq!(options[1]["text"], "Go");
    assert_eq!(options[1]["votes"], 0);
}

#[tokio::test]
async fn get_nonexistent_poll_fails() {
    let harness = TestHarness::new();

    let missing = PollId::generate();
    let response = harness
        .server
        .get(&format!("/v1/polls/{missing}"))
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn get_poll_with_malformed_id_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/polls/not-a-ulid")
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_bad_request();
}

// ============================================================================
// Update Poll
// ============================================================================

#[tokio::test]
async fn update_poll_success() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Draft title",
            "options": ["Yes", "No"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    let poll_id = created["id"].as_str().unwrap();

    let response = harness
        .server
        .put(&format!("/v1/polls/{poll_id}"))
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Final title",
            "description": "Now with context",
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Final title");
    assert_eq!(body["description"], "Now with context");

    // Options are untouched by updates
    let options = body["options"].as_array().unwrap();
    assert_eq!(options.len(), 2);
}

#[tokio::test]
async fn update_poll_by_non_owner_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Mine",
            "options": ["Yes", "No"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    let poll_id = created["id"].as_str().unwrap();

    let response = harness
        .server
        .put(&format!("/v1/polls/{poll_id}"))
        .add_header("authorization", TestHarness::other_user_auth_header())
        .json(&json!({
            "title": "Hijacked",
        }))
        .await;

    response.assert_status_forbidden();

    // The poll is unchanged
    let response = harness
        .server
        .get(&format!("/v1/polls/{poll_id}"))
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Mine");
}

#[tokio::test]
async fn update_poll_with_blank_title_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Valid",
            "options": ["Yes", "No"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    let poll_id = created["id"].as_str().unwrap();

    let response = harness
        .server
        .put(&format!("/v1/polls/{poll_id}"))
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "",
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn update_nonexistent_poll_fails() {
    let harness = TestHarness::new();

    let missing = PollId::generate();
    let response = harness
        .server
        .put(&format!("/v1/polls/{missing}"))
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "New title",
        }))
        .await;

    response.assert_status_not_found();
}

// ============================================================================
// Delete Poll
// ============================================================================

#[tokio::test]
async fn delete_poll_success() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Short lived",
            "options": ["Yes", "No"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    let poll_id = created["id"].as_str().unwrap();

    let response = harness
        .server
        .delete(&format!("/v1/polls/{poll_id}"))
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_ok();

    // Verify the poll is gone
    let response = harness
        .server
        .get(&format!("/v1/polls/{poll_id}"))
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn delete_poll_by_non_owner_fails() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/polls")
        .add_header("authorization", harness.user_auth_header())
        .json(&json!({
            "title": "Mine",
            "options": ["Yes", "No"],
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    let poll_id = created["id"].as_str().unwrap();

    let response = harness
        .server
        .delete(&format!("/v1/polls/{poll_id}"))
        .add_header("authorization", TestHarness::other_user_auth_header())
        .await;

    response.assert_status_forbidden();
}

#[tokio::test]
async fn delete_nonexistent_poll_fails() {
    let harness = TestHarness::new();

    let missing = PollId::generate();
    let response = harness
        .server
        .delete(&format!("/v1/polls/{missing}"))
        .add_header("authorization", harness.user_auth_header())
        .await;

    response.assert_status_not_found();
}
