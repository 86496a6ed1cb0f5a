// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory gateway for tests and local development without Firestore.

use crate::db::Gateway;
use crate::error::AppError;
use crate::models::{Activity, LogEntry, Post, PostFilter, UserAccount, UserProfile};
use crate::services::titles::Title;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;

/// Gateway backed by concurrent maps. Nothing is persisted.
#[derive(Default)]
pub struct MemoryDb {
    catalog: DashMap<String, Activity>,
    accounts: DashMap<String, UserAccount>,
    profiles: DashMap<String, UserProfile>,
    posts: Mutex<Vec<Post>>,
    logs: Mutex<Vec<LogEntry>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account.
    pub fn put_account(&self, account: UserAccount) {
        self.accounts.insert(account.uid.clone(), account);
    }

    /// Insert or replace a profile.
    pub fn put_profile(&self, profile: UserProfile) {
        self.profiles.insert(profile.uid.clone(), profile);
    }

    /// Add a post to the store.
    pub fn put_post(&self, post: Post) {
        self.posts_lock().push(post);
    }

    /// Number of stored logs.
    pub fn log_count(&self) -> usize {
        self.logs_lock().len()
    }

    // A poisoned lock only means another test thread panicked mid-push;
    // the vectors are still valid.
    fn posts_lock(&self) -> std::sync::MutexGuard<'_, Vec<Post>> {
        self.posts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn logs_lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        self.logs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Gateway for MemoryDb {
    async fn fetch_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        Ok(self.catalog.get(id).map(|a| a.value().clone()))
    }

    async fn list_catalog(&self) -> Result<Vec<Activity>, AppError> {
        let mut items: Vec<Activity> = self.catalog.iter().map(|a| a.value().clone()).collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn seed_catalog(&self, items: &[Activity]) -> Result<bool, AppError> {
        if !self.catalog.is_empty() {
            return Ok(false);
        }
        for item in items {
            self.catalog.insert(item.id.clone(), item.clone());
        }
        Ok(true)
    }

    async fn fetch_candidate_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, AppError> {
        let mut posts: Vec<Post> = self
            .posts_lock()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        // Newest first; posts without a timestamp sort last
        posts.sort_by(|a, b| b.created_at_millis.cmp(&a.created_at_millis));
        posts.truncate(filter.limit as usize);
        Ok(posts)
    }

    async fn persist_log(&self, entry: &LogEntry) -> Result<(), AppError> {
        self.logs_lock().push(entry.clone());
        Ok(())
    }

    async fn list_logs(&self, uid: &str, date: &str) -> Result<Vec<LogEntry>, AppError> {
        let mut logs: Vec<LogEntry> = self
            .logs_lock()
            .iter()
            .filter(|l| l.user_id == uid && l.date == date)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(logs)
    }

    async fn logs_for_users(&self, uids: &[String]) -> Result<Vec<LogEntry>, AppError> {
        Ok(self
            .logs_lock()
            .iter()
            .filter(|l| uids.contains(&l.user_id))
            .cloned()
            .collect())
    }

    async fn increment_credit(&self, uid: &str, delta: u64) -> Result<u64, AppError> {
        let mut account = self
            .accounts
            .entry(uid.to_string())
            .or_insert_with(|| UserAccount::new(uid));
        account.gaia_credit = account.gaia_credit.saturating_add(delta);
        Ok(account.gaia_credit)
    }

    async fn get_account(&self, uid: &str) -> Result<Option<UserAccount>, AppError> {
        Ok(self.accounts.get(uid).map(|a| a.value().clone()))
    }

    async fn set_title(&self, uid: &str, title: &Title) -> Result<(), AppError> {
        let mut account = self
            .accounts
            .entry(uid.to_string())
            .or_insert_with(|| UserAccount::new(uid));
        account.title_key = Some(title.key.clone());
        account.title_label = Some(title.label.clone());
        Ok(())
    }

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.get(uid).map(|p| p.value().clone()))
    }

    async fn list_profiles(&self, limit: u32) -> Result<Vec<UserProfile>, AppError> {
        let mut profiles: Vec<UserProfile> =
            self.profiles.iter().map(|p| p.value().clone()).collect();
        profiles.sort_by(|a, b| a.uid.cmp(&b.uid));
        profiles.truncate(limit as usize);
        Ok(profiles)
    }
}
