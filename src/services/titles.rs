// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credit tiers and their localized labels.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Supported label languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Lang {
    #[default]
    Tr,
    En,
}

impl Lang {
    /// Parse a language code. Only the exact code `"en"` selects English;
    /// anything else, including `"EN"`, maps to the default language.
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Lang::En,
            _ => Lang::default(),
        }
    }
}

/// A tier boundary: reaching `min` credit earns `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleThreshold {
    pub key: String,
    pub min: u64,
}

impl TitleThreshold {
    pub fn new(key: &str, min: u64) -> Self {
        Self {
            key: key.to_string(),
            min,
        }
    }
}

/// Resolved title for a credit total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Title {
    pub key: String,
    pub label: String,
}

/// Threshold list plus label tables.
#[derive(Debug, Clone)]
pub struct TitleTable {
    thresholds: Vec<TitleThreshold>,
    labels: HashMap<Lang, HashMap<String, String>>,
    /// country code -> (key -> label)
    country_overrides: HashMap<String, HashMap<String, String>>,
}

impl TitleTable {
    /// Build a table, rejecting threshold lists that break tier lookup.
    ///
    /// Thresholds must be non-empty, start at 0 and be strictly ascending.
    pub fn new(thresholds: Vec<TitleThreshold>) -> Result<Self, TitleTableError> {
        let first = thresholds.first().ok_or(TitleTableError::Empty)?;
        if first.min != 0 {
            return Err(TitleTableError::NonZeroFirst(first.min));
        }
        if let Some(pair) = thresholds.windows(2).find(|w| w[1].min <= w[0].min) {
            return Err(TitleTableError::Unsorted(pair[1].key.clone()));
        }

        Ok(Self {
            thresholds,
            labels: HashMap::new(),
            country_overrides: HashMap::new(),
        })
    }

    /// Add or replace the label for `key` in `lang`.
    pub fn with_label(mut self, lang: Lang, key: &str, label: &str) -> Self {
        self.labels
            .entry(lang)
            .or_default()
            .insert(key.to_string(), label.to_string());
        self
    }

    /// Add a country-specific label that wins over every language table.
    pub fn with_country_override(mut self, country_code: &str, key: &str, label: &str) -> Self {
        self.country_overrides
            .entry(country_code.to_string())
            .or_default()
            .insert(key.to_string(), label.to_string());
        self
    }

    pub fn thresholds(&self) -> &[TitleThreshold] {
        &self.thresholds
    }

    /// Key of the highest tier whose minimum `credit_total` reaches.
    pub fn tier_for(&self, credit_total: u64) -> &str {
        // new() guarantees a first threshold with min == 0
        let mut key = self.thresholds[0].key.as_str();
        for threshold in &self.thresholds {
            if credit_total >= threshold.min {
                key = threshold.key.as_str();
            }
        }
        key
    }

    /// Title and display label for a credit total.
    ///
    /// Never fails: an unknown language uses the default language, an
    /// unknown country has no override, and a missing label is the key.
    pub fn pick_title(&self, credit_total: u64, country_code: Option<&str>, lang: &str) -> Title {
        let key = self.tier_for(credit_total);

        let override_label = country_code
            .and_then(|code| self.country_overrides.get(code))
            .and_then(|labels| labels.get(key));
        let lang_label = self
            .labels
            .get(&Lang::from_code(lang))
            .and_then(|labels| labels.get(key));

        let label = override_label
            .or(lang_label)
            .cloned()
            .unwrap_or_else(|| key.to_string());

        Title {
            key: key.to_string(),
            label,
        }
    }
}

impl Default for TitleTable {
    /// The product's reference tiers and labels.
    fn default() -> Self {
        let thresholds = vec![
            TitleThreshold::new("seed", 0),
            TitleThreshold::new("sprout", 120),
            TitleThreshold::new("guardian", 600),
            TitleThreshold::new("architect", 1500),
        ];

        let mut table = Self {
            thresholds,
            labels: HashMap::new(),
            country_overrides: HashMap::new(),
        };
        for lang in [Lang::Tr, Lang::En] {
            table = table
                .with_label(lang, "seed", "Seed")
                .with_label(lang, "sprout", "Sprout")
                .with_label(lang, "guardian", "Gaia Guardian")
                .with_label(lang, "architect", "Earth Architect");
        }
        table.with_country_override("TR", "guardian", "Toprak Koruyucusu")
    }
}

/// Errors from building a title table.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TitleTableError {
    #[error("Title thresholds must not be empty")]
    Empty,

    #[error("First title threshold must start at 0, got {0}")]
    NonZeroFirst(u64),

    #[error("Title thresholds must be strictly ascending (at '{0}')")]
    Unsorted(String),
}
