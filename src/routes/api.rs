// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::stats::daily_total;
use crate::models::{Activity, CountryStats, LogEntry, NewLog, Post, Visibility};
use crate::services::catalog::search_catalog;
use crate::services::LogOutcome;
use crate::time_utils::parse_log_date;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const DEFAULT_FEED_LIMIT: usize = 60;
const MAX_FEED_LIMIT: usize = 100;
/// Profiles scanned when aggregating per-country stats.
const COUNTRY_STATS_PROFILE_SCAN: u32 = 600;
const MAX_NAME_LEN: usize = 100;

/// API routes, nested under `/api`.
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/catalog", get(get_catalog))
        .route("/logs", get(get_logs).post(add_log))
        .route("/title", get(get_title))
        .route("/feed", get(get_feed))
        .route("/stats/country/{country}", get(get_country_stats))
}

// ─── Catalog ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct CatalogQuery {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CatalogResponse {
    pub activities: Vec<Activity>,
}

/// Search the activity catalog by name or category.
async fn get_catalog(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<CatalogResponse>> {
    if params.q.len() > MAX_NAME_LEN {
        return Err(AppError::BadRequest("Search term too long".to_string()));
    }

    let all = state.gateway.list_catalog().await?;
    Ok(Json(CatalogResponse {
        activities: search_catalog(all, &params.q),
    }))
}

// ─── Carbon Logs ─────────────────────────────────────────────

/// Body of `POST /api/logs`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddLogRequest {
    #[validate(length(min = 1, max = 100))]
    pub activity_id: String,
    #[validate(range(min = 0.0, max = 100000.0))]
    pub quantity: f64,
    /// Day of the activity ("YYYY-MM-DD")
    pub date: String,
    /// Label language for the returned title
    pub lang: Option<String>,
}

/// Record a carbon log and return the CO2, credit and title it produced.
async fn add_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<AddLogRequest>,
) -> Result<Json<LogOutcome>> {
    body.validate()?;
    if parse_log_date(&body.date).is_none() {
        return Err(AppError::BadRequest(
            "Invalid 'date': expected YYYY-MM-DD".to_string(),
        ));
    }

    let lang = body
        .lang
        .clone()
        .unwrap_or_else(|| state.config.default_lang.clone());
    let input = NewLog {
        activity_id: body.activity_id,
        quantity: body.quantity,
        date: body.date,
    };

    let outcome = state
        .carbon
        .add_log(&user.uid, input, &lang, chrono::Utc::now())
        .await?;
    Ok(Json(outcome))
}

#[derive(Deserialize)]
struct LogsQuery {
    date: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogsResponse {
    pub logs: Vec<LogEntry>,
    pub total_co2: f64,
}

/// List the caller's logs for one day with the day's CO2 total.
async fn get_logs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<LogsQuery>,
) -> Result<Json<LogsResponse>> {
    if parse_log_date(&params.date).is_none() {
        return Err(AppError::BadRequest(
            "Invalid 'date': expected YYYY-MM-DD".to_string(),
        ));
    }

    let logs = state.gateway.list_logs(&user.uid, &params.date).await?;
    let total_co2 = daily_total(&logs);
    Ok(Json(LogsResponse { logs, total_co2 }))
}

// ─── Title ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TitleResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub credit: u64,
    pub key: String,
    pub label: String,
}

/// Caller's credit total and title.
async fn get_title(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<LangQuery>,
) -> Result<Json<TitleResponse>> {
    let lang = params
        .lang
        .unwrap_or_else(|| state.config.default_lang.clone());
    let (credit, title) = state.carbon.current_title(&user.uid, &lang).await?;

    Ok(Json(TitleResponse {
        credit,
        key: title.key,
        label: title.label,
    }))
}

// ─── Feed ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FeedQuery {
    #[serde(default)]
    visibility: Visibility,
    #[serde(default = "default_feed_limit")]
    limit: usize,
}

fn default_feed_limit() -> usize {
    DEFAULT_FEED_LIMIT
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
}

/// Caller's ranked feed.
async fn get_feed(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<FeedQuery>,
) -> Result<Json<FeedResponse>> {
    if params.limit == 0 || params.limit > MAX_FEED_LIMIT {
        return Err(AppError::BadRequest(format!(
            "'limit' must be between 1 and {}",
            MAX_FEED_LIMIT
        )));
    }

    let now_millis = chrono::Utc::now().timestamp_millis();
    let posts = state
        .feed
        .feed_for_user(&user.uid, params.visibility, params.limit, now_millis)
        .await?;

    Ok(Json(FeedResponse { posts }))
}

// ─── Stats ───────────────────────────────────────────────────

/// Carbon totals for every user in a country.
async fn get_country_stats(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
) -> Result<Json<CountryStats>> {
    if country.trim().is_empty() || country.len() > MAX_NAME_LEN {
        return Err(AppError::BadRequest("Invalid country".to_string()));
    }

    let profiles = state
        .gateway
        .list_profiles(COUNTRY_STATS_PROFILE_SCAN)
        .await?;
    let uids: Vec<String> = profiles
        .iter()
        .filter(|p| p.country.as_deref() == Some(country.as_str()))
        .map(|p| p.uid.clone())
        .collect();

    if uids.is_empty() {
        return Ok(Json(CountryStats::empty(&country)));
    }

    let logs = state.gateway.logs_for_users(&uids).await?;
    tracing::debug!(
        country = %country,
        users = uids.len(),
        logs = logs.len(),
        "Aggregating country stats"
    );

    Ok(Json(CountryStats::aggregate(&country, &profiles, &logs)))
}
