// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication tests for protected routes.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_health_is_public() {
    let (app, _state, _db) = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_missing_token_rejected() {
    let (app, _state, _db) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/title")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_wrong_signing_key_rejected() {
    let (app, _state, _db) = common::create_test_app();
    let token = common::create_test_jwt("u1", b"some_other_key_that_is_not_ours");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/title")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_non_bearer_scheme_rejected() {
    let (app, state, _db) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/title")
                .header(header::AUTHORIZATION, format!("Token {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_accepted() {
    let (app, state, _db) = common::create_test_app();
    let token = common::create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/title?lang=en")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["credit"], 0);
    assert_eq!(body["key"], "seed");
}

#[tokio::test]
async fn test_cors_allows_dev_server_but_not_lookalike_host() {
    let (app, _state, _db) = common::create_test_app();

    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/api/feed")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(preflight("http://localhost:5173"))
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );

    let response = app
        .oneshot(preflight("http://localhost.evil.example"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
