// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Application constants and environment-based configuration values.
//! Scoring thresholds and fallback values live here as named constants
//! because they encode product policy, not derived facts; changing one is a
//! product decision, not a refactor.

use std::env;

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Get data-store base URL from environment or default
    pub fn datastore_base_url() -> String {
        env::var("DATASTORE_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:9000/api/v1".to_string())
    }

    /// Get data-store API key from environment
    pub fn datastore_api_key() -> Option<String> {
        env::var("DATASTORE_API_KEY").ok()
    }

    /// Get data-store request timeout from environment or default
    pub fn datastore_timeout_secs() -> u64 {
        env::var("DATASTORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }

    /// Get default forecast horizon from environment or default
    pub fn forecast_horizon_days() -> u32 {
        env::var("FORECAST_HORIZON_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30)
    }

    /// Get log level from environment or default
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    }
}

/// Sample-size floors and analysis windows
pub mod limits {
    /// Regression needs 2 degrees of freedom plus a slack sample
    pub const MIN_SAMPLES_FOR_REGRESSION: usize = 3;

    /// Cadence prediction needs at least 2 gaps
    pub const MIN_EVENTS_FOR_CADENCE: usize = 3;

    /// Below this many sessions the activity trend is forced to stable
    pub const MIN_SESSIONS_FOR_TREND: usize = 7;

    /// Trailing window for activity, churn and pattern derivation
    pub const ANALYSIS_WINDOW_DAYS: i64 = 30;

    /// Recent sub-window for the activity trend split
    pub const RECENT_WINDOW_DAYS: i64 = 7;

    /// How far back metric history is fetched for forecasting and cadence
    pub const HISTORY_WINDOW_DAYS: i64 = 90;

    /// How far back wellness history is fetched for seasonal bucketing
    pub const SEASONAL_WINDOW_DAYS: i64 = 365;

    /// Activity confidence is capped below certainty
    pub const MAX_ACTIVITY_CONFIDENCE: f64 = 95.0;
}

/// Fixed rule thresholds for the scoring components
pub mod thresholds {
    /// Churn: days since last activity
    pub const CHURN_ACTIVITY_GAP_SEVERE_DAYS: f64 = 14.0;
    pub const CHURN_ACTIVITY_GAP_SEVERE_INCREMENT: f64 = 0.4;
    pub const CHURN_ACTIVITY_GAP_MILD_DAYS: f64 = 7.0;
    pub const CHURN_ACTIVITY_GAP_MILD_INCREMENT: f64 = 0.2;

    /// Churn: days since last login
    pub const CHURN_LOGIN_GAP_SEVERE_DAYS: f64 = 7.0;
    pub const CHURN_LOGIN_GAP_SEVERE_INCREMENT: f64 = 0.3;
    pub const CHURN_LOGIN_GAP_MILD_DAYS: f64 = 3.0;
    pub const CHURN_LOGIN_GAP_MILD_INCREMENT: f64 = 0.1;

    /// Churn: engagement events per day
    pub const CHURN_FREQUENCY_SEVERE: f64 = 0.1;
    pub const CHURN_FREQUENCY_SEVERE_INCREMENT: f64 = 0.3;
    pub const CHURN_FREQUENCY_MILD: f64 = 0.5;
    pub const CHURN_FREQUENCY_MILD_INCREMENT: f64 = 0.1;

    /// Churn tier boundaries
    pub const CHURN_TIER_HIGH: f64 = 0.7;
    pub const CHURN_TIER_MEDIUM: f64 = 0.4;

    /// Health risk: BMI-equivalent forecast
    pub const HEALTH_BMI_HIGH: f64 = 30.0;
    pub const HEALTH_BMI_HIGH_INCREMENT: f64 = 0.3;
    pub const HEALTH_BMI_ELEVATED: f64 = 25.0;
    pub const HEALTH_BMI_ELEVATED_INCREMENT: f64 = 0.1;

    /// Health risk: projected activity score
    pub const HEALTH_LOW_ACTIVITY_SCORE: f64 = 5.0;
    pub const HEALTH_LOW_ACTIVITY_INCREMENT: f64 = 0.2;

    /// Health risk tier boundaries
    pub const HEALTH_TIER_HIGH: f64 = 0.5;
    pub const HEALTH_TIER_MEDIUM: f64 = 0.2;

    /// Interventions: rule trigger thresholds
    pub const INTERVENTION_EXERCISE_WEEKLY_MIN: f64 = 3.0;
    pub const INTERVENTION_NUTRITION_MIN: f64 = 70.0;
    pub const INTERVENTION_SLEEP_MIN: f64 = 6.0;
    pub const INTERVENTION_HYDRATION_MIN: f64 = 8.0;

    /// Cadence consistency: average-gap ceilings per domain (high, medium).
    /// Gaps above the medium ceiling classify as low consistency.
    pub const CADENCE_PURCHASES_HIGH_GAP_DAYS: f64 = 10.0;
    pub const CADENCE_PURCHASES_MEDIUM_GAP_DAYS: f64 = 20.0;
    pub const CADENCE_EXERCISE_HIGH_GAP_DAYS: f64 = 2.0;
    pub const CADENCE_EXERCISE_MEDIUM_GAP_DAYS: f64 = 4.0;
    pub const CADENCE_NUTRITION_HIGH_GAP_DAYS: f64 = 1.5;
    pub const CADENCE_NUTRITION_MEDIUM_GAP_DAYS: f64 = 3.0;
}

/// Seasonal inference policy
pub mod seasonal {
    /// Backfill multiplier for summer buckets (activity, mood, energy only)
    pub const SUMMER_MULTIPLIER: f64 = 1.15;

    /// Backfill multiplier for winter buckets (activity, mood, energy only)
    pub const WINTER_MULTIPLIER: f64 = 0.85;

    /// Spring and autumn carry the cross-season mean unmodified
    pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

    /// Fallback bucket when no season holds any sample
    pub const DEFAULT_ACTIVITY_LEVEL: f64 = 5.0;
    pub const DEFAULT_MOOD_SCORE: f64 = 6.0;
    pub const DEFAULT_ENERGY_LEVEL: f64 = 6.0;
    pub const DEFAULT_SLEEP_QUALITY: f64 = 7.0;
}

/// Inherited policy defaults
///
/// These values came from the product side, not from data; preserve them as
/// written.
pub mod defaults {
    /// Activity score returned when a subject has no sessions in the window
    pub const ZERO_DATA_ACTIVITY_SCORE: f64 = 2.0;

    /// Confidence paired with the zero-data activity score
    pub const ZERO_DATA_ACTIVITY_CONFIDENCE: f64 = 50.0;

    /// Hydration level assumed when no calculator history exists
    pub const DEFAULT_HYDRATION_LEVEL: f64 = 5.0;

    /// Sleep-quality proxy: base value plus per-weekly-session increment,
    /// clamped to [0, 10]. There is no direct sleep data source.
    pub const SLEEP_PROXY_BASE: f64 = 5.0;
    pub const SLEEP_PROXY_PER_WEEKLY_SESSION: f64 = 0.5;

    /// Nutrition log count that saturates the 0-100 nutrition score
    /// (three logged meals a day for 30 days)
    pub const NUTRITION_LOGS_FOR_FULL_SCORE: f64 = 90.0;

    /// Trend adjustment applied to the activity score projection
    pub const ACTIVITY_PROJECTION_ADJUSTMENT: f64 = 0.10;
}

/// Well-known metric names in the data-store
pub mod metrics {
    pub const WEIGHT: &str = "weight";
    pub const BMI: &str = "bmi";
    pub const ACTIVITY_LEVEL: &str = "activity_level";
    pub const MOOD_SCORE: &str = "mood_score";
    pub const ENERGY_LEVEL: &str = "energy_level";
    pub const SLEEP_QUALITY: &str = "sleep_quality";
    pub const HYDRATION_LEVEL: &str = "hydration_level";

    /// The four metrics partitioned by the seasonal engine
    pub const SEASONAL_METRICS: [&str; 4] =
        [ACTIVITY_LEVEL, MOOD_SCORE, ENERGY_LEVEL, SLEEP_QUALITY];
}

/// User-facing messages
pub mod messages {
    /// Analysis failures
    pub const INSUFFICIENT_DATA: &str = "insufficient data";
    pub const UPSTREAM_FAILURE: &str = "data source unavailable";
    pub const COMPUTATION_FAILURE: &str = "analysis could not be completed";

    /// Coaching message on the zero-data activity path
    pub const ZERO_DATA_COACHING: &str =
        "No workouts recorded in the last 30 days. Start with two short sessions this week to build momentum.";
}

/// Service identity
pub mod service {
    /// Service name for structured logging
    pub const SERVICE_NAME: &str = "vitalis-analytics";

    /// Crate version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}
