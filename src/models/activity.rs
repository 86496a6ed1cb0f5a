// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog activity and carbon log models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Catalog entry describing a loggable activity.
///
/// Stored at `activities_catalog/{id}`. Reference data: written once by the
/// seeding step and never modified by the logging flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Catalog ID (also used as document ID)
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Category ("transport", "energy", "waste", ...)
    #[serde(default)]
    pub category: String,
    /// Unit the quantity is measured in ("km", "kWh", "item")
    #[serde(default)]
    pub unit: String,
    /// kg CO2e per unit. Negative values are savings.
    #[serde(default)]
    pub emission_factor: Option<f64>,
    #[serde(default)]
    pub description: String,
    /// Whether the client should ask for a proof photo
    #[serde(default)]
    pub requires_proof: bool,
}

impl Activity {
    /// Build a catalog entry with the fields the ledger cares about.
    pub fn new(id: &str, category: &str, unit: &str, emission_factor: f64) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            category: category.to_string(),
            unit: unit.to_string(),
            emission_factor: Some(emission_factor),
            description: String::new(),
            requires_proof: false,
        }
    }
}

/// A single carbon log written when a user records an activity.
///
/// Stored in `user_logs`. The CO2 value is computed once at creation and is
/// re-derivable from `(activity, quantity)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogEntry {
    pub user_id: String,
    pub activity_id: String,
    pub quantity: f64,
    #[serde(rename = "calculatedCO2")]
    pub calculated_co2: f64,
    /// Calendar day the activity happened on ("YYYY-MM-DD")
    pub date: String,
    /// When the log was written (RFC 3339)
    pub created_at: String,
}

/// User input for a new carbon log.
#[derive(Debug, Clone)]
pub struct NewLog {
    pub activity_id: String,
    pub quantity: f64,
    pub date: String,
}
