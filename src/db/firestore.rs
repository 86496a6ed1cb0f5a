// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides the [`Gateway`] operations over:
//! - Activity catalog (reference data)
//! - User logs (one document per recorded activity)
//! - User accounts (credit and title, field-masked writes only)
//! - User profiles (read-only settings)
//! - Social posts (read-only here, written by the web client)

use crate::db::{collections, Gateway};
use crate::error::AppError;
use crate::models::{
    Activity, LogEntry, MediaKind, Post, PostFilter, UserAccount, UserProfile, Visibility,
};
use crate::services::titles::Title;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use firestore::{path_camel_case, paths_camel_case, FirestoreValue};
use gcloud_sdk::google::firestore::v1::value::ValueType;
use futures_util::{stream, StreamExt};
use serde::Deserialize;

const MAX_CONCURRENT_DB_OPS: usize = 50;
// Firestore `in` filters accept a bounded number of values; stay well below it.
const IN_QUERY_CHUNK: usize = 10;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

/// Post document as written by the web client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostDocument {
    #[serde(alias = "_firestore_id")]
    id: Option<String>,
    #[serde(default)]
    uid: String,
    #[serde(default)]
    text: String,
    #[serde(default, with = "firestore::serialize_as_optional_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    like_count: u32,
    #[serde(default)]
    echo_count: u32,
    #[serde(default)]
    comment_count: u32,
    #[serde(default)]
    media: Option<MediaDocument>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    city: Option<String>,
    /// Legacy posts have no visibility and are public
    #[serde(default)]
    visibility: Option<Visibility>,
}

#[derive(Debug, Clone, Deserialize)]
struct MediaDocument {
    kind: Option<MediaKind>,
}

impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Post {
            id: doc.id.unwrap_or_default(),
            uid: doc.uid,
            text: doc.text,
            created_at_millis: doc.created_at.map(|t| t.timestamp_millis()),
            like_count: doc.like_count,
            echo_count: doc.echo_count,
            comment_count: doc.comment_count,
            media_kind: doc.media.and_then(|m| m.kind),
            country: doc.country,
            city: doc.city,
            visibility: doc.visibility.unwrap_or_default(),
        }
    }
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator rejects real credentials, so skip credential discovery there.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client. Every operation returns a database error.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

/// Fields written when an increment has to create a missing account.
fn account_create_mask() -> Vec<String> {
    vec![path_camel_case!(UserAccount::uid)]
}

/// Fields written when the title changes.
fn title_mask() -> Vec<String> {
    paths_camel_case!(UserAccount::{title_key, title_label})
}

/// New total reported by an increment transform.
fn credit_from_transform(value: &FirestoreValue) -> Option<u64> {
    match &value.value.value_type {
        Some(ValueType::IntegerValue(total)) => u64::try_from(*total).ok(),
        _ => None,
    }
}

#[async_trait]
impl Gateway for FirestoreDb {
    // ─── Catalog ─────────────────────────────────────────────────

    async fn fetch_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES_CATALOG)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_catalog(&self) -> Result<Vec<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES_CATALOG)
            .order_by([("id", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn seed_catalog(&self, items: &[Activity]) -> Result<bool, AppError> {
        let client = self.get_client()?;

        let existing: Vec<Activity> = client
            .fluent()
            .select()
            .from(collections::ACTIVITIES_CATALOG)
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if !existing.is_empty() {
            return Ok(false);
        }

        stream::iter(items.to_vec())
            .map(|item| async move {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::ACTIVITIES_CATALOG)
                    .document_id(&item.id)
                    .object(&item)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok::<_, AppError>(())
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::info!(count = items.len(), "Seeded activity catalog");
        Ok(true)
    }

    // ─── Social Posts ────────────────────────────────────────────

    async fn fetch_candidate_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, AppError> {
        let visibility = filter.visibility.as_str();
        let author = filter.author.clone();

        let docs: Vec<PostDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::SOCIAL_POSTS)
            .filter(move |q| {
                q.for_all([
                    q.field("visibility").eq(visibility),
                    author.clone().and_then(|uid| q.field("uid").eq(uid)),
                ])
            })
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .limit(filter.limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(docs.into_iter().map(Post::from).collect())
    }

    // ─── Carbon Logs ─────────────────────────────────────────────

    async fn persist_log(&self, entry: &LogEntry) -> Result<(), AppError> {
        let _: LogEntry = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USER_LOGS)
            .generate_document_id()
            .object(entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn list_logs(&self, uid: &str, date: &str) -> Result<Vec<LogEntry>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USER_LOGS)
            .filter(|q| {
                q.for_all([
                    q.field("userId").eq(uid),
                    q.field("date").eq(date),
                ])
            })
            .order_by([("createdAt", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn logs_for_users(&self, uids: &[String]) -> Result<Vec<LogEntry>, AppError> {
        let client = self.get_client()?;

        let chunks: Vec<Vec<String>> = uids.chunks(IN_QUERY_CHUNK).map(|c| c.to_vec()).collect();

        let batches = stream::iter(chunks)
            .map(|chunk| async move {
                client
                    .fluent()
                    .select()
                    .from(collections::USER_LOGS)
                    .filter(move |q| q.field("userId").is_in(chunk.clone()))
                    .obj::<LogEntry>()
                    .query()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Vec<LogEntry>, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<Vec<LogEntry>>, AppError>>()?;

        Ok(batches.into_iter().flatten().collect())
    }

    // ─── Accounts & Credit ───────────────────────────────────────

    /// Server-side increment, so concurrent logs never overwrite each other.
    async fn increment_credit(&self, uid: &str, delta: u64) -> Result<u64, AppError> {
        let client = self.get_client()?;
        let account = UserAccount::new(uid);

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .fields(account_create_mask())
            .in_col(collections::USERS)
            .document_id(uid)
            .object(&account)
            .transforms(|t| {
                t.fields([t
                    .field(path_camel_case!(UserAccount::gaia_credit))
                    .increment(delta)])
            })
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add credit to transaction: {}", e))
            })?;

        let response = transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        let reported = response
            .write_results
            .first()
            .and_then(|r| r.transform_results.first())
            .and_then(credit_from_transform);

        let total = match reported {
            Some(total) => total,
            None => self
                .get_account(uid)
                .await?
                .map_or(delta, |a| a.gaia_credit),
        };

        tracing::debug!(uid, delta, total, "Credit incremented");
        Ok(total)
    }

    async fn get_account(&self, uid: &str) -> Result<Option<UserAccount>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn set_title(&self, uid: &str, title: &Title) -> Result<(), AppError> {
        let patch = UserAccount {
            title_key: Some(title.key.clone()),
            title_label: Some(title.label.clone()),
            ..UserAccount::new(uid)
        };

        let _: UserAccount = self
            .get_client()?
            .fluent()
            .update()
            .fields(title_mask())
            .in_col(collections::USERS)
            .document_id(uid)
            .object(&patch)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Profiles ────────────────────────────────────────────────

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USER_PROFILES)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_profiles(&self, limit: u32) -> Result<Vec<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USER_PROFILES)
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
