// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP routing: public health check plus the authenticated `/api` tree.

pub mod api;

use crate::middleware::auth::require_auth;
use crate::AppState;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, Uri};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Hosts a local web client dev server may run on.
const DEV_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    /// "firestore" or "memory"
    pub store: String,
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    let store = if state.config.use_memory_db {
        "memory"
    } else {
        "firestore"
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        store: store.to_string(),
    })
}

/// Whether a browser `Origin` may call the API.
///
/// The configured frontend must match exactly. Local dev servers are
/// accepted over plain http on any port, but only when the host itself is
/// one of [`DEV_HOSTS`].
fn is_allowed_origin(origin: &str, frontend_url: &str) -> bool {
    if origin == frontend_url {
        return true;
    }

    let Ok(uri) = origin.parse::<Uri>() else {
        return false;
    };
    let bare = uri.path_and_query().map_or(true, |p| p.as_str() == "/");
    let plain_authority = uri
        .authority()
        .is_some_and(|a| !a.as_str().contains('@'));

    uri.scheme_str() == Some("http")
        && bare
        && plain_authority
        && uri.host().is_some_and(|host| DEV_HOSTS.contains(&host))
}

fn cors_layer(frontend_url: String) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request_parts: &axum::http::request::Parts| {
                origin
                    .to_str()
                    .is_ok_and(|o| is_allowed_origin(o, &frontend_url))
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = api::routes().route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(cors_layer(state.config.frontend_url.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
