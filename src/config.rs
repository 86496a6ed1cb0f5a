//! Application configuration loaded from environment variables.
//!
//! Product-tuning constants (credit multiplier, feed recency window) have
//! defaults matching the reference behavior and can be overridden per
//! deployment.

use crate::services::ledger::CREDIT_PER_KG_SAVED;
use crate::services::FeedWeights;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Language code used when a request does not name one
    pub default_lang: String,
    /// Credits per kg of CO2 saved
    pub credit_per_kg_saved: f64,
    /// Hours after which a post earns no recency points
    pub feed_recency_hours: f64,
    /// Posts fetched from the store before ranking
    pub feed_candidate_limit: u32,
    /// Serve from the in-memory store instead of Firestore
    pub use_memory_db: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            default_lang: "tr".to_string(),
            credit_per_kg_saved: CREDIT_PER_KG_SAVED,
            feed_recency_hours: FeedWeights::default().recency_window_hours,
            feed_candidate_limit: 200,
            use_memory_db: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: parse_var("PORT", defaults.port)?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            default_lang: env::var("DEFAULT_LANG").unwrap_or(defaults.default_lang),
            credit_per_kg_saved: parse_tuning("CREDIT_PER_KG_SAVED", defaults.credit_per_kg_saved)?,
            feed_recency_hours: parse_tuning("FEED_RECENCY_HOURS", defaults.feed_recency_hours)?,
            feed_candidate_limit: parse_var("FEED_CANDIDATE_LIMIT", defaults.feed_candidate_limit)?,
            use_memory_db: env::var("USE_MEMORY_DB").is_ok_and(|v| v == "1" || v == "true"),
        })
    }

    /// Feed weights with this deployment's recency window.
    pub fn feed_weights(&self) -> FeedWeights {
        FeedWeights {
            recency_window_hours: self.feed_recency_hours,
            ..Default::default()
        }
    }
}

/// Read an optional variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Read a tuning constant. Must be finite and not negative.
fn parse_tuning(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = parse_var(name, default)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Invalid(name, value.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("FEED_RECENCY_HOURS", "48");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.credit_per_kg_saved, 50.0);
        assert_eq!(config.feed_weights().recency_window_hours, 48.0);
        assert_eq!(config.feed_candidate_limit, 200);

        env::set_var("FEED_CANDIDATE_LIMIT", "lots");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("FEED_CANDIDATE_LIMIT", _))
        ));
        env::remove_var("FEED_CANDIDATE_LIMIT");

        for bad in ["-50", "NaN", "inf"] {
            env::set_var("CREDIT_PER_KG_SAVED", bad);
            assert!(
                matches!(
                    Config::from_env(),
                    Err(ConfigError::Invalid("CREDIT_PER_KG_SAVED", _))
                ),
                "CREDIT_PER_KG_SAVED={bad} should be rejected"
            );
        }
        env::remove_var("CREDIT_PER_KG_SAVED");

        env::set_var("FEED_RECENCY_HOURS", "-1");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("FEED_RECENCY_HOURS", _))
        ));
        env::remove_var("FEED_RECENCY_HOURS");
    }
}
