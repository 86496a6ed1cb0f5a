//! Database layer (Firestore) behind a narrow gateway trait.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Activity, LogEntry, Post, PostFilter, UserAccount, UserProfile};
use crate::services::titles::Title;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const ACTIVITIES_CATALOG: &str = "activities_catalog";
    pub const USER_LOGS: &str = "user_logs";
    /// Account documents: credit, title, country code
    pub const USERS: &str = "users";
    /// User-edited settings: locality, feed prefs
    pub const USER_PROFILES: &str = "user_profiles";
    pub const SOCIAL_POSTS: &str = "social_posts";
}

/// Everything the services need from the document store.
///
/// Implemented by [`FirestoreDb`] in production and [`MemoryDb`] for tests
/// and offline development.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Look up a catalog activity by ID.
    async fn fetch_activity(&self, id: &str) -> Result<Option<Activity>, AppError>;

    /// All catalog activities.
    async fn list_catalog(&self) -> Result<Vec<Activity>, AppError>;

    /// Write `items` if the catalog is empty. Returns `true` if anything was written.
    async fn seed_catalog(&self, items: &[Activity]) -> Result<bool, AppError>;

    /// Newest posts with the filter's visibility, at most `filter.limit`.
    async fn fetch_candidate_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, AppError>;

    /// Store a new carbon log.
    async fn persist_log(&self, entry: &LogEntry) -> Result<(), AppError>;

    /// A user's logs for one day, newest first.
    async fn list_logs(&self, uid: &str, date: &str) -> Result<Vec<LogEntry>, AppError>;

    /// All logs belonging to any of `uids`.
    async fn logs_for_users(&self, uids: &[String]) -> Result<Vec<LogEntry>, AppError>;

    /// Atomically add `delta` to the account's credit and return the new total.
    ///
    /// Creates the account document if it does not exist yet. No other
    /// account field is touched.
    async fn increment_credit(&self, uid: &str, delta: u64) -> Result<u64, AppError>;

    /// Account document from `users`.
    async fn get_account(&self, uid: &str) -> Result<Option<UserAccount>, AppError>;

    /// Store the user's current title key and label on the account.
    async fn set_title(&self, uid: &str, title: &Title) -> Result<(), AppError>;

    /// Settings document from `user_profiles`.
    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError>;

    /// Up to `limit` profiles, for aggregate statistics.
    async fn list_profiles(&self, limit: u32) -> Result<Vec<UserProfile>, AppError>;
}
