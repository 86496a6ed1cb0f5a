// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! GaiaTrace: community carbon tracking with a ranked social feed
//!
//! This crate provides the carbon ledger (CO2, reward credit and titles),
//! the feed ranker, and the HTTP API that serves them on top of Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Gateway;
use services::{CarbonLedger, CarbonService, FeedRanker, FeedService, TitleTable};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub gateway: Arc<dyn Gateway>,
    pub carbon: CarbonService,
    pub feed: FeedService,
}

impl AppState {
    /// Wire services to a gateway using the tuning values from `config`.
    pub fn new(config: Config, gateway: Arc<dyn Gateway>) -> Self {
        let ledger = CarbonLedger::new(config.credit_per_kg_saved);
        let titles = Arc::new(TitleTable::default());
        let carbon = CarbonService::new(gateway.clone(), ledger, titles);
        let feed = FeedService::new(
            gateway.clone(),
            FeedRanker::new(config.feed_weights()),
            config.feed_candidate_limit,
        );

        Self {
            config,
            gateway,
            carbon,
            feed,
        }
    }
}
