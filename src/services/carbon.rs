// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Carbon logging workflow.
//!
//! 1. Resolve the catalog activity
//! 2. Compute CO2 and store the log
//! 3. Reward savings with credit
//! 4. Refresh the user's title

use crate::db::Gateway;
use crate::error::{AppError, Result};
use crate::models::{LogEntry, NewLog};
use crate::services::ledger::CarbonLedger;
use crate::services::titles::{Title, TitleTable};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Result of recording a carbon log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogOutcome {
    pub co2: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub credit_delta: u64,
    /// Credit after this log
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub credit_total: u64,
    pub title: Title,
}

/// Records carbon logs and keeps credit and titles in step.
#[derive(Clone)]
pub struct CarbonService {
    gateway: Arc<dyn Gateway>,
    ledger: CarbonLedger,
    titles: Arc<TitleTable>,
}

impl CarbonService {
    pub fn new(gateway: Arc<dyn Gateway>, ledger: CarbonLedger, titles: Arc<TitleTable>) -> Self {
        Self {
            gateway,
            ledger,
            titles,
        }
    }

    /// Record a log for `uid`.
    ///
    /// Credit and title are only written when the log saved CO2.
    pub async fn add_log(
        &self,
        uid: &str,
        input: NewLog,
        lang: &str,
        now: DateTime<Utc>,
    ) -> Result<LogOutcome> {
        let activity = self
            .gateway
            .fetch_activity(&input.activity_id)
            .await?
            .ok_or_else(|| AppError::UnknownActivity(input.activity_id.clone()))?;

        let co2 = self.ledger.calculate_co2(&activity, input.quantity);

        let entry = LogEntry {
            user_id: uid.to_string(),
            activity_id: activity.id.clone(),
            quantity: input.quantity,
            calculated_co2: co2,
            date: input.date,
            created_at: format_utc_rfc3339(now),
        };
        self.gateway.persist_log(&entry).await?;

        let credit_delta = self.ledger.credit_delta_for(co2);
        if credit_delta > 0 {
            self.gateway.increment_credit(uid, credit_delta).await?;
        }
        let account = self.gateway.get_account(uid).await?;

        let credit_total = account.as_ref().map_or(0, |a| a.gaia_credit);
        let country_code = account.as_ref().and_then(|a| a.country_code.as_deref());
        let title = self.titles.pick_title(credit_total, country_code, lang);

        if credit_delta > 0 {
            self.gateway.set_title(uid, &title).await?;
        }

        tracing::info!(
            uid,
            activity_id = %entry.activity_id,
            co2,
            credit_delta,
            credit_total,
            title = %title.key,
            "Carbon log recorded"
        );

        Ok(LogOutcome {
            co2,
            credit_delta,
            credit_total,
            title,
        })
    }

    /// Current title for a user, without writing anything.
    pub async fn current_title(&self, uid: &str, lang: &str) -> Result<(u64, Title)> {
        let account = self.gateway.get_account(uid).await?;
        let credit = account.as_ref().map_or(0, |a| a.gaia_credit);
        let country_code = account.as_ref().and_then(|a| a.country_code.as_deref());
        Ok((credit, self.titles.pick_title(credit, country_code, lang)))
    }
}
