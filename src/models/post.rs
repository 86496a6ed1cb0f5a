// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Social post and viewer preference models used by feed ranking.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Who can see a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// Kind of media attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    /// Anything else, including kinds added by newer clients.
    #[serde(other)]
    File,
}

/// A post as seen by the ranker. Read-only; the score is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Post {
    pub id: String,
    /// Author uid
    pub uid: String,
    pub text: String,
    /// Creation time in Unix milliseconds, if the backend has set it yet
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub created_at_millis: Option<i64>,
    pub like_count: u32,
    pub echo_count: u32,
    pub comment_count: u32,
    pub media_kind: Option<MediaKind>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub visibility: Visibility,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: String::new(),
            uid: String::new(),
            text: String::new(),
            created_at_millis: None,
            like_count: 0,
            echo_count: 0,
            comment_count: 0,
            media_kind: None,
            country: None,
            city: None,
            visibility: Visibility::Public,
        }
    }
}

/// Viewer-side inputs to ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerPrefs {
    pub prefer_video: bool,
    pub prefer_text: bool,
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Query used to fetch ranking candidates from the store.
#[derive(Debug, Clone)]
pub struct PostFilter {
    pub visibility: Visibility,
    /// Only posts by this uid
    pub author: Option<String>,
    /// Maximum number of candidates (newest first)
    pub limit: u32,
}

impl PostFilter {
    /// Candidates a viewer may see: every public post, or only their own
    /// private posts.
    pub fn for_viewer(uid: &str, visibility: Visibility, limit: u32) -> Self {
        let author = match visibility {
            Visibility::Public => None,
            Visibility::Private => Some(uid.to_string()),
        };
        Self {
            visibility,
            author,
            limit,
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        post.visibility == self.visibility
            && self.author.as_deref().map_or(true, |author| post.uid == author)
    }
}
