// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Carbon logging through the HTTP API.
//!
//! Covers the full path: catalog lookup, CO2 computation, credit reward and
//! title refresh, plus request validation.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use gaiatrace::db::Gateway;
use gaiatrace::models::{UserAccount, UserProfile};
use serde_json::json;
use tower::ServiceExt;

mod common;

fn post_log(token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/logs")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_add_log_rewards_credit_and_title() {
    let (app, state, db) = common::create_test_app();
    db.seed_catalog(&common::test_catalog()).await.unwrap();
    db.put_account(UserAccount {
        country_code: Some("TR".to_string()),
        gaia_credit: 100,
        ..UserAccount::new("u1")
    });
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(post_log(
            &token,
            json!({ "activity_id": "walk", "quantity": 10, "date": "2024-05-01" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["co2"], -2.0);
    assert_eq!(body["credit_delta"], 100);
    assert_eq!(body["credit_total"], 200);
    assert_eq!(body["title"]["key"], "sprout");

    let account = db.get_account("u1").await.unwrap().unwrap();
    assert_eq!(account.gaia_credit, 200);
    assert_eq!(account.title_label.as_deref(), Some("Sprout"));
}

#[tokio::test]
async fn test_add_log_uses_requested_language_and_override() {
    let (app, state, db) = common::create_test_app();
    db.seed_catalog(&common::test_catalog()).await.unwrap();
    db.put_account(UserAccount {
        country_code: Some("TR".to_string()),
        gaia_credit: 590,
        ..UserAccount::new("u1")
    });
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(post_log(
            &token,
            json!({ "activity_id": "walk", "quantity": 1, "date": "2024-05-01", "lang": "en" }),
        ))
        .await
        .unwrap();

    let body = common::body_json(response).await;
    assert_eq!(body["credit_total"], 600);
    assert_eq!(body["title"]["key"], "guardian");
    assert_eq!(body["title"]["label"], "Toprak Koruyucusu");
}

#[tokio::test]
async fn test_emission_log_gives_no_credit() {
    let (app, state, db) = common::create_test_app();
    db.seed_catalog(&common::test_catalog()).await.unwrap();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(post_log(
            &token,
            json!({ "activity_id": "car", "quantity": 10, "date": "2024-05-01" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["co2"], 1.7);
    assert_eq!(body["credit_delta"], 0);
    assert_eq!(db.log_count(), 1);
}

#[tokio::test]
async fn test_unknown_activity_not_found() {
    let (app, state, db) = common::create_test_app();
    db.seed_catalog(&common::test_catalog()).await.unwrap();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(post_log(
            &token,
            json!({ "activity_id": "teleport", "quantity": 1, "date": "2024-05-01" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "unknown_activity");
    assert_eq!(db.log_count(), 0);
}

#[tokio::test]
async fn test_invalid_log_requests_rejected() {
    let (app, state, db) = common::create_test_app();
    db.seed_catalog(&common::test_catalog()).await.unwrap();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let bad_bodies = [
        json!({ "activity_id": "walk", "quantity": -1, "date": "2024-05-01" }),
        json!({ "activity_id": "walk", "quantity": 1e9, "date": "2024-05-01" }),
        json!({ "activity_id": "", "quantity": 1, "date": "2024-05-01" }),
        json!({ "activity_id": "walk", "quantity": 1, "date": "yesterday" }),
    ];

    for body in bad_bodies {
        let response = app
            .clone()
            .oneshot(post_log(&token, body.clone()))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {}",
            body
        );
    }
    assert_eq!(db.log_count(), 0);
}

#[tokio::test]
async fn test_list_logs_for_day_with_total() {
    let (app, state, db) = common::create_test_app();
    db.seed_catalog(&common::test_catalog()).await.unwrap();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    for (activity, quantity, date) in [
        ("walk", 10.0, "2024-05-01"),
        ("car", 1.0, "2024-05-01"),
        ("walk", 5.0, "2024-05-02"),
    ] {
        let response = app
            .clone()
            .oneshot(post_log(
                &token,
                json!({ "activity_id": activity, "quantity": quantity, "date": date }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get("/api/logs?date=2024-05-01", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["logs"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_co2"], -1.83);

    let response = app
        .oneshot(get("/api/logs?date=May", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_title_reads_credit_from_account_not_profile() {
    let (app, state, db) = common::create_test_app();
    db.put_account(UserAccount {
        country_code: Some("TR".to_string()),
        gaia_credit: 700,
        ..UserAccount::new("u1")
    });
    db.put_profile(UserProfile {
        country: Some("Türkiye".to_string()),
        city: Some("Ankara".to_string()),
        ..UserProfile::new("u1")
    });
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(get("/api/title?lang=en", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["credit"], 700);
    assert_eq!(body["key"], "guardian");
    assert_eq!(body["label"], "Toprak Koruyucusu");
}
