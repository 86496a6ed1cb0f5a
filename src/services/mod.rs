// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod carbon;
pub mod catalog;
pub mod feed;
pub mod ledger;
pub mod titles;

pub use carbon::{CarbonService, LogOutcome};
pub use feed::{FeedRanker, FeedService, FeedWeights};
pub use ledger::CarbonLedger;
pub use titles::{Lang, Title, TitleTable};
