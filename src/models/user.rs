//! User documents for storage and API.
//!
//! A user is split across two collections, both keyed by the auth uid:
//! - `users/{uid}`: account data, including credit and the current title
//! - `user_profiles/{uid}`: settings the user edits (locality, feed prefs)

use serde::{Deserialize, Serialize};

use crate::models::ViewerPrefs;

/// Account document at `users/{uid}`.
///
/// Created by the web client on first sign-in. This crate only writes
/// `gaiaCredit`, `titleKey` and `titleLabel` (and `uid` when an increment has
/// to create the document), always through field masks or transforms so the
/// rest of the document is left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(default)]
    pub uid: String,
    /// ISO country code used for title label overrides ("TR")
    #[serde(default)]
    pub country_code: Option<String>,
    /// Cumulative reward credit. Never decreases.
    #[serde(default)]
    pub gaia_credit: u64,
    #[serde(default)]
    pub title_key: Option<String>,
    #[serde(default)]
    pub title_label: Option<String>,
}

impl UserAccount {
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
            ..Default::default()
        }
    }
}

/// Feed format preferences chosen in the profile settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPrefs {
    #[serde(default)]
    pub prefer_video: bool,
    #[serde(default)]
    pub prefer_text: bool,
}

/// Profile settings at `user_profiles/{uid}`. Read-only here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Auth uid (also used as document ID)
    pub uid: String,
    /// Country name as entered by the user
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub feed_prefs: FeedPrefs,
}

impl UserProfile {
    /// An empty profile for a user who has not saved settings yet.
    pub fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
            ..Default::default()
        }
    }

    /// Ranking preferences derived from this profile.
    pub fn viewer_prefs(&self) -> ViewerPrefs {
        ViewerPrefs {
            prefer_video: self.feed_prefs.prefer_video,
            prefer_text: self.feed_prefs.prefer_text,
            country: self.country.clone(),
            city: self.city.clone(),
        }
    }
}
