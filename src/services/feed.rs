// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Feed ranking.
//!
//! [`FeedRanker`] is a pure weighted-sum ranker over already-fetched posts.
//! [`FeedService`] feeds it candidates and viewer prefs from the gateway.

use crate::db::Gateway;
use crate::error::Result;
use crate::models::{MediaKind, Post, PostFilter, ViewerPrefs, Visibility};
use std::sync::Arc;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Tuning constants for the feed score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedWeights {
    /// Posts older than this earn no recency points
    pub recency_window_hours: f64,
    /// Age assumed for posts without a creation time
    pub missing_age_hours: f64,
    pub like: f64,
    pub echo: f64,
    pub comment: f64,
    pub video_bonus: f64,
    pub text_bonus: f64,
    pub same_country_bonus: f64,
    pub same_city_bonus: f64,
    /// Bonus for fresh posts nobody has liked yet
    pub discovery_bonus: f64,
    pub discovery_window_hours: f64,
}

impl Default for FeedWeights {
    fn default() -> Self {
        Self {
            recency_window_hours: 72.0,
            missing_age_hours: 9999.0,
            like: 0.6,
            echo: 0.8,
            comment: 0.4,
            video_bonus: 10.0,
            text_bonus: 5.0,
            same_country_bonus: 4.0,
            same_city_bonus: 3.0,
            discovery_bonus: 2.0,
            discovery_window_hours: 12.0,
        }
    }
}

/// Deterministic feed ranker. Never reads the clock itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedRanker {
    weights: FeedWeights,
}

impl FeedRanker {
    pub fn new(weights: FeedWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FeedWeights {
        &self.weights
    }

    /// Hours between `now_millis` and the post's creation time.
    fn age_hours(&self, post: &Post, now_millis: i64) -> f64 {
        match post.created_at_millis {
            // f64 keeps extreme timestamps from overflowing the subtraction
            Some(created) => (now_millis as f64 - created as f64) / MILLIS_PER_HOUR,
            None => self.weights.missing_age_hours,
        }
    }

    /// Score of a single post for this viewer.
    pub fn score(&self, post: &Post, prefs: &ViewerPrefs, now_millis: i64) -> f64 {
        let w = &self.weights;
        let age_hours = self.age_hours(post, now_millis);

        let mut score = (w.recency_window_hours - age_hours).max(0.0);

        score += f64::from(post.like_count) * w.like;
        score += f64::from(post.echo_count) * w.echo;
        score += f64::from(post.comment_count) * w.comment;

        let is_video = post.media_kind == Some(MediaKind::Video);
        if is_video && prefs.prefer_video {
            score += w.video_bonus;
        }
        if !is_video && prefs.prefer_text {
            score += w.text_bonus;
        }

        if same_place(prefs.country.as_deref(), post.country.as_deref()) {
            score += w.same_country_bonus;
        }
        if same_place(prefs.city.as_deref(), post.city.as_deref()) {
            score += w.same_city_bonus;
        }

        if post.like_count < 1 && age_hours < w.discovery_window_hours {
            score += w.discovery_bonus;
        }

        score
    }

    /// Filter by visibility, order by descending score and keep `limit`.
    ///
    /// Sorting is stable: equal scores keep their input order.
    pub fn rank_feed(
        &self,
        posts: Vec<Post>,
        prefs: &ViewerPrefs,
        now_millis: i64,
        visibility: Visibility,
        limit: usize,
    ) -> Vec<Post> {
        let mut scored: Vec<(f64, Post)> = posts
            .into_iter()
            .filter(|p| p.visibility == visibility)
            .map(|p| (self.score(&p, prefs, now_millis), p))
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(limit);
        scored.into_iter().map(|(_, post)| post).collect()
    }
}

/// Empty strings count as "not set", same as a missing value.
fn same_place(viewer: Option<&str>, post: Option<&str>) -> bool {
    match (viewer, post) {
        (Some(v), Some(p)) => !v.is_empty() && v == p,
        _ => false,
    }
}

/// Builds a viewer's ranked feed from stored posts.
#[derive(Clone)]
pub struct FeedService {
    gateway: Arc<dyn Gateway>,
    ranker: FeedRanker,
    candidate_limit: u32,
}

impl FeedService {
    pub fn new(gateway: Arc<dyn Gateway>, ranker: FeedRanker, candidate_limit: u32) -> Self {
        Self {
            gateway,
            ranker,
            candidate_limit,
        }
    }

    /// Rank up to `candidate_limit` of the newest posts for `uid`.
    pub async fn feed_for_user(
        &self,
        uid: &str,
        visibility: Visibility,
        limit: usize,
        now_millis: i64,
    ) -> Result<Vec<Post>> {
        let filter = PostFilter::for_viewer(uid, visibility, self.candidate_limit);
        let candidates = self.gateway.fetch_candidate_posts(&filter).await?;

        let prefs = self
            .gateway
            .get_profile(uid)
            .await?
            .map(|profile| profile.viewer_prefs())
            .unwrap_or_default();

        tracing::debug!(
            uid,
            candidates = candidates.len(),
            visibility = visibility.as_str(),
            limit,
            "Ranking feed"
        );

        Ok(self
            .ranker
            .rank_feed(candidates, &prefs, now_millis, visibility, limit))
    }
}
