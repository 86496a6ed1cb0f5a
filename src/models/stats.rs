//! Carbon statistics aggregates.
//!
//! Computed on request from already-fetched profiles and logs; nothing here
//! is persisted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{LogEntry, UserProfile};
use crate::services::ledger::round_to_grams;

/// Carbon totals for all users of one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStats {
    pub country: String,
    pub user_count: u32,
    pub log_count: u32,
    #[serde(rename = "totalCO2")]
    pub total_co2: f64,
    /// Average CO2 per user (not per log)
    #[serde(rename = "avgCO2")]
    pub avg_co2: f64,
}

impl CountryStats {
    /// Stats for a country with no registered users.
    pub fn empty(country: &str) -> Self {
        Self {
            country: country.to_string(),
            user_count: 0,
            log_count: 0,
            total_co2: 0.0,
            avg_co2: 0.0,
        }
    }

    /// Aggregate logs of every profile whose country matches `country`.
    ///
    /// Logs belonging to other users are ignored, so callers may pass a
    /// superset.
    pub fn aggregate(country: &str, profiles: &[UserProfile], logs: &[LogEntry]) -> Self {
        let members: HashSet<&str> = profiles
            .iter()
            .filter(|p| p.country.as_deref() == Some(country))
            .map(|p| p.uid.as_str())
            .filter(|uid| !uid.is_empty())
            .collect();

        if members.is_empty() {
            return Self::empty(country);
        }

        let mut log_count = 0u32;
        let mut total = 0.0;
        for log in logs.iter().filter(|l| members.contains(l.user_id.as_str())) {
            log_count += 1;
            total += log.calculated_co2;
        }

        let total_co2 = round_to_grams(total);
        Self {
            country: country.to_string(),
            user_count: members.len() as u32,
            log_count,
            total_co2,
            avg_co2: round_to_grams(total_co2 / members.len() as f64),
        }
    }
}

/// Sum of CO2 over a set of logs (typically one user's day).
pub fn daily_total(logs: &[LogEntry]) -> f64 {
    round_to_grams(logs.iter().map(|l| l.calculated_co2).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(uid: &str, country: Option<&str>) -> UserProfile {
        UserProfile {
            country: country.map(String::from),
            ..UserProfile::new(uid)
        }
    }

    fn log(uid: &str, co2: f64) -> LogEntry {
        LogEntry {
            user_id: uid.to_string(),
            activity_id: "walk".to_string(),
            quantity: 1.0,
            calculated_co2: co2,
            date: "2024-05-01".to_string(),
            created_at: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_aggregate_filters_by_country() {
        let profiles = vec![
            profile("a", Some("Türkiye")),
            profile("b", Some("Türkiye")),
            profile("c", Some("Germany")),
        ];
        let logs = vec![log("a", -2.0), log("b", -0.5), log("c", -10.0), log("a", 0.25)];

        let stats = CountryStats::aggregate("Türkiye", &profiles, &logs);

        assert_eq!(stats.user_count, 2);
        assert_eq!(stats.log_count, 3);
        assert_eq!(stats.total_co2, -2.25);
        assert_eq!(stats.avg_co2, -1.125);
    }

    #[test]
    fn test_aggregate_unknown_country_is_empty() {
        let profiles = vec![profile("a", Some("Germany"))];
        let logs = vec![log("a", -1.0)];

        let stats = CountryStats::aggregate("Atlantis", &profiles, &logs);
        assert_eq!(stats, CountryStats::empty("Atlantis"));
    }

    #[test]
    fn test_aggregate_rounds_to_three_decimals() {
        let profiles = vec![
            profile("a", Some("X")),
            profile("b", Some("X")),
            profile("c", Some("X")),
        ];
        let logs = vec![log("a", -1.0)];

        let stats = CountryStats::aggregate("X", &profiles, &logs);
        assert_eq!(stats.avg_co2, -0.333);
    }

    #[test]
    fn test_daily_total() {
        let logs = vec![log("a", -0.1), log("a", -0.2)];
        assert_eq!(daily_total(&logs), -0.3);
        assert_eq!(daily_total(&[]), 0.0);
    }
}
