// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod post;
pub mod stats;
pub mod user;

pub use activity::{Activity, LogEntry, NewLog};
pub use post::{MediaKind, Post, PostFilter, ViewerPrefs, Visibility};
pub use stats::CountryStats;
pub use user::{FeedPrefs, UserAccount, UserProfile};
