// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use gaiatrace::config::Config;
use gaiatrace::db::MemoryDb;
use gaiatrace::middleware::auth::create_jwt;
use gaiatrace::models::Activity;
use gaiatrace::routes::create_router;
use gaiatrace::AppState;
use std::sync::Arc;

/// Create a test app backed by an in-memory store with a small catalog.
/// Returns the router, the shared state and the store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryDb>) {
    let db = Arc::new(MemoryDb::new());
    let state = Arc::new(AppState::new(Config::default(), db.clone()));
    let app = create_router(state.clone());
    (app, state, db)
}

/// Catalog entries used across tests.
#[allow(dead_code)]
pub fn test_catalog() -> Vec<Activity> {
    vec![
        Activity::new("walk", "transport", "km", -0.20),
        Activity::new("car", "transport", "km", 0.17),
    ]
}

/// Create a session token for `uid` signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    create_jwt(uid, signing_key).expect("Failed to create JWT")
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
