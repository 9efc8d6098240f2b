// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Core data structures used throughout the Vitalis analytics engine. The
//! record types mirror what the hosted data-store returns; the result types
//! are what the scoring components produce for the request-handling layer.
//!
//! ## Design Principles
//!
//! - **Store Agnostic**: record models abstract away data-store specifics
//! - **Immutable**: records are produced once per request and never mutated
//! - **Serializable**: all models support JSON serialization for the
//!   response payload
//! - **Type Safe**: tiers, trends and priorities are enums, never raw strings
//!
//! ## Core Models
//!
//! - [`MetricSample`]: one timestamped observation of a named metric
//! - [`Forecast`]: projected metric value with trend and confidence
//! - [`EngagementSnapshot`] / [`ChurnAssessment`]: churn scoring input/output
//! - [`SeasonalBucket`]: per-season averaged wellness metrics
//! - [`InterventionCandidate`]: a recommended improvement action

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Provider-side records
// ---------------------------------------------------------------------------

/// A raw metric history row as returned by the data-store
///
/// The store is not required to return rows sorted; the aggregator sorts
/// ascending by timestamp before any component sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// When the observation was recorded (UTC)
    pub timestamp: DateTime<Utc>,
    /// Observed value in the metric's native unit
    pub value: f64,
}

/// A platform engagement event (workout logged, feed post, order placed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementEvent {
    /// When the event occurred (UTC)
    pub occurred_at: DateTime<Utc>,
    /// Free-form event kind as recorded by the platform
    pub kind: String,
}

/// A completed workout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSession {
    /// When the session was completed (UTC)
    pub completed_at: DateTime<Utc>,
    /// Session length in minutes
    pub duration_minutes: f64,
}

/// A domain-specific behavior event
///
/// `quantity` carries the domain's secondary measurement: order total for
/// purchases, session minutes for exercise, meals logged for nutrition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorEvent {
    /// When the event occurred (UTC)
    pub occurred_at: DateTime<Utc>,
    /// Domain-specific quantity, if the store recorded one
    pub quantity: Option<f64>,
}

/// Behavior domains tracked by the cadence predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorDomain {
    /// Store purchases
    Purchases,
    /// Workout sessions
    Exercise,
    /// Nutrition log entries
    Nutrition,
}

impl BehaviorDomain {
    /// Stable identifier used in API paths and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchases => "purchases",
            Self::Exercise => "exercise",
            Self::Nutrition => "nutrition",
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregated samples
// ---------------------------------------------------------------------------

/// One normalized, timestamped observation of a named metric for a subject
///
/// Produced by the record aggregator from raw [`MetricRecord`]s; immutable
/// once produced and discarded when the request completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Subject the observation belongs to
    pub subject_id: Uuid,
    /// Metric the observation belongs to (e.g. "weight", "bmi")
    pub metric_name: String,
    /// When the observation was recorded (UTC)
    pub timestamp: DateTime<Utc>,
    /// Observed value in the metric's native unit
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Forecasting
// ---------------------------------------------------------------------------

/// Direction of a fitted or classified trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// A projected future value for a single metric
///
/// `confidence` is the coefficient of determination (R²) of the linear fit
/// scaled to 0-100. It measures how well the line explains the history, not
/// a statistical prediction interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    /// Metric this forecast is for
    pub metric_name: String,
    /// Projected value at the requested horizon
    pub predicted_value: f64,
    /// Goodness-of-fit confidence, 0-100
    pub confidence: f64,
    /// Sign of the fitted slope
    pub trend: TrendDirection,
    /// Fitted slope in metric units per day
    pub change_rate: f64,
}

// ---------------------------------------------------------------------------
// Churn
// ---------------------------------------------------------------------------

/// Engagement recency/frequency signals, derived once per churn evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    /// Engagement events in the trailing 30 days
    pub activities_last_30d: u32,
    /// Days since the most recent engagement event
    pub days_since_last_activity: f64,
    /// Days since the subject last logged in
    pub days_since_last_login: f64,
    /// Engagement events per day over the trailing 30 days
    pub activity_frequency: f64,
}

/// Discrete risk tier derived from a bounded score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Churn risk evaluation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnAssessment {
    /// Heuristic churn probability, clamped to [0, 1]
    pub score: f64,
    /// Tier derived from fixed score thresholds; never mutated afterwards
    pub risk_tier: RiskTier,
    /// Fixed retention actions for the tier, in priority order
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// Activity score and short-term trend for the trailing 30 days
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityTrendReport {
    /// Bounded 0-10 composite of frequency and duration scores
    pub activity_score: f64,
    /// `activity_score` adjusted ±10% by the trend direction
    pub predicted_activity_score: f64,
    /// Distinct exercise days scaled to a weekly figure
    pub weekly_frequency: f64,
    /// Mean session length in minutes over the window
    pub average_duration_minutes: f64,
    /// Recent-window vs. older-window classification
    pub trend: TrendDirection,
    /// Sample-size confidence, capped at 95
    pub confidence: f64,
    /// Set only on the zero-data fallback path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coaching_message: Option<String>,
}

// ---------------------------------------------------------------------------
// Health risk
// ---------------------------------------------------------------------------

/// Composite health risk built from already-computed forecasts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRiskReport {
    /// Sum of fixed rule increments, clamped to [0, 1]
    pub score: f64,
    /// Tier derived from fixed score thresholds
    pub tier: RiskTier,
    /// Human-readable description of each rule that fired
    pub factors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

/// Qualitative regularity label for a behavior domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyLevel {
    High,
    Medium,
    Low,
}

/// A domain-specific secondary statistic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainStatistic {
    /// What the value measures (e.g. "average_order_value")
    pub label: String,
    /// The computed value
    pub value: f64,
}

/// Projected next event for a behavior domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadencePrediction {
    /// Domain the prediction covers
    pub domain: BehaviorDomain,
    /// Mean gap between consecutive events, in days
    pub average_gap_days: f64,
    /// Last event timestamp plus the mean gap
    pub next_expected: DateTime<Utc>,
    /// Number of events the gaps were derived from
    pub event_count: usize,
    /// Domain-specific secondary statistic
    pub statistic: DomainStatistic,
    /// Regularity classification from fixed per-domain thresholds
    pub consistency: ConsistencyLevel,
}

// ---------------------------------------------------------------------------
// Seasonal
// ---------------------------------------------------------------------------

/// Fixed calendar-quarter season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// All seasons in projection order
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Season for a calendar month (1-12): Dec-Feb winter, Mar-May spring,
    /// Jun-Aug summer, Sep-Nov autumn
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    /// Next season in the fixed cyclic sequence
    pub fn next(&self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Autumn,
            Self::Autumn => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }

    /// Stable identifier used in recommendations and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

/// Averaged wellness metrics for one season
///
/// Buckets with `sample_count == 0` are filled by the inference policy
/// before use; `sample_count` stays 0 so backfilled buckets remain
/// distinguishable from observed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalBucket {
    /// Season the bucket covers
    pub season: Season,
    /// Mean activity level, 0-10
    pub activity_level: f64,
    /// Mean mood score, 0-10
    pub mood_score: f64,
    /// Mean energy level, 0-10
    pub energy_level: f64,
    /// Mean sleep quality, 0-10
    pub sleep_quality: f64,
    /// Observations that contributed to the averages
    pub sample_count: usize,
}

/// Projected change for one wellness metric across the season boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalShift {
    /// Metric the shift covers
    pub metric: String,
    /// Current season's bucket value
    pub current: f64,
    /// Next season's bucket value
    pub projected: f64,
    /// `projected - current`
    pub delta: f64,
    /// Sign of the delta
    pub trend: TrendDirection,
}

/// Next-season projection with per-metric deltas and recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalOutlook {
    /// Season the request was evaluated in
    pub current_season: Season,
    /// Season being projected
    pub next_season: Season,
    /// All four buckets after backfill, in [`Season::ALL`] order
    pub buckets: Vec<SeasonalBucket>,
    /// Per-metric deltas across the season boundary
    pub shifts: Vec<SeasonalShift>,
    /// Fixed recommendations keyed by the next season
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Interventions
// ---------------------------------------------------------------------------

/// Priority for an intervention, ordered by explicit ordinal
///
/// Declared low-to-high so the derived `Ord` matches the ordinal: sorting
/// descending puts high first. String comparison of the labels is never
/// used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionPriority {
    Low,
    Medium,
    High,
}

impl InterventionPriority {
    /// Explicit ordinal: High=2, Medium=1, Low=0
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::High => 2,
            Self::Medium => 1,
            Self::Low => 0,
        }
    }
}

/// A per-subject pattern snapshot consumed by the intervention recommender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPattern {
    /// Workout sessions per week, derived from the trailing 30 days
    pub exercise_frequency: f64,
    /// 0-100 score derived from nutrition log density
    pub nutrition_score: f64,
    /// 0-10 proxy inferred from exercise frequency (no direct sleep source)
    pub sleep_quality: f64,
    /// 0-10 level from recent hydration-calculator history, or the default
    pub hydration_level: f64,
}

/// A recommended improvement action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionCandidate {
    /// Stable intervention kind (e.g. "exercise", "nutrition")
    pub intervention_type: String,
    /// Priority ordinal used for sorting
    pub priority: InterventionPriority,
    /// Fixed title for the rule that fired
    pub title: String,
    /// Fixed description for the rule that fired
    pub description: String,
    /// Fixed action list, in order
    pub recommended_actions: Vec<String>,
    /// Fixed expected-impact statement
    pub expected_impact: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_month() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(5), Season::Spring);
        assert_eq!(Season::from_month(6), Season::Summer);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(9), Season::Autumn);
        assert_eq!(Season::from_month(11), Season::Autumn);
    }

    #[test]
    fn test_season_cycle() {
        assert_eq!(Season::Spring.next(), Season::Summer);
        assert_eq!(Season::Summer.next(), Season::Autumn);
        assert_eq!(Season::Autumn.next(), Season::Winter);
        assert_eq!(Season::Winter.next(), Season::Spring);
    }

    #[test]
    fn test_priority_ordinal_ordering() {
        let mut priorities = vec![
            InterventionPriority::Medium,
            InterventionPriority::Low,
            InterventionPriority::High,
        ];
        priorities.sort_by(|a, b| b.ordinal().cmp(&a.ordinal()));
        assert_eq!(
            priorities,
            vec![
                InterventionPriority::High,
                InterventionPriority::Medium,
                InterventionPriority::Low,
            ]
        );
        // Derived Ord agrees with the explicit ordinal
        assert!(InterventionPriority::High > InterventionPriority::Medium);
        assert!(InterventionPriority::Medium > InterventionPriority::Low);
    }

    #[test]
    fn test_trend_direction_serialization() {
        let json = serde_json::to_string(&TrendDirection::Increasing).unwrap();
        assert_eq!(json, "\"increasing\"");
        let json = serde_json::to_string(&RiskTier::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}
