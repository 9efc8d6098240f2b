//! Churn risk scoring from engagement signals

use crate::constants::{limits, thresholds};
use crate::models::{ChurnAssessment, EngagementEvent, EngagementSnapshot, RiskTier};
use chrono::{DateTime, Utc};

/// Scores churn risk from an engagement snapshot
///
/// An additive rule table: each signal contributes a fixed increment when
/// its threshold is crossed, the sum is clamped to [0, 1], and the tier is a
/// pure function of the score. Retention recommendations are fixed per tier.
pub struct ChurnRiskScorer;

impl ChurnRiskScorer {
    pub fn new() -> Self {
        Self
    }

    /// Derive the engagement snapshot for the trailing 30-day window
    ///
    /// A subject with no events or no recorded login in the window is
    /// treated as being the full window length away; that is the most the
    /// fetched data can attest to.
    pub fn derive_snapshot(
        &self,
        events: &[EngagementEvent],
        last_login: Option<DateTime<Utc>>,
        as_of: DateTime<Utc>,
    ) -> EngagementSnapshot {
        let window_days = limits::ANALYSIS_WINDOW_DAYS as f64;

        let days_since_last_activity = events
            .iter()
            .map(|e| e.occurred_at)
            .max()
            .map(|latest| days_between(latest, as_of))
            .unwrap_or(window_days);

        let days_since_last_login = last_login
            .map(|login| days_between(login, as_of))
            .unwrap_or(window_days);

        EngagementSnapshot {
            activities_last_30d: events.len() as u32,
            days_since_last_activity,
            days_since_last_login,
            activity_frequency: events.len() as f64 / window_days,
        }
    }

    /// Evaluate the rule table against a snapshot
    pub fn assess(&self, snapshot: &EngagementSnapshot) -> ChurnAssessment {
        let mut score = 0.0;

        if snapshot.days_since_last_activity > thresholds::CHURN_ACTIVITY_GAP_SEVERE_DAYS {
            score += thresholds::CHURN_ACTIVITY_GAP_SEVERE_INCREMENT;
        } else if snapshot.days_since_last_activity > thresholds::CHURN_ACTIVITY_GAP_MILD_DAYS {
            score += thresholds::CHURN_ACTIVITY_GAP_MILD_INCREMENT;
        }

        if snapshot.days_since_last_login > thresholds::CHURN_LOGIN_GAP_SEVERE_DAYS {
            score += thresholds::CHURN_LOGIN_GAP_SEVERE_INCREMENT;
        } else if snapshot.days_since_last_login > thresholds::CHURN_LOGIN_GAP_MILD_DAYS {
            score += thresholds::CHURN_LOGIN_GAP_MILD_INCREMENT;
        }

        if snapshot.activity_frequency < thresholds::CHURN_FREQUENCY_SEVERE {
            score += thresholds::CHURN_FREQUENCY_SEVERE_INCREMENT;
        } else if snapshot.activity_frequency < thresholds::CHURN_FREQUENCY_MILD {
            score += thresholds::CHURN_FREQUENCY_MILD_INCREMENT;
        }

        let score = score.clamp(0.0, 1.0);

        let risk_tier = if score >= thresholds::CHURN_TIER_HIGH {
            RiskTier::High
        } else if score >= thresholds::CHURN_TIER_MEDIUM {
            RiskTier::Medium
        } else {
            RiskTier::Low
        };

        ChurnAssessment {
            score,
            risk_tier,
            recommendations: retention_recommendations(risk_tier),
        }
    }
}

impl Default for ChurnRiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    ((later - earlier).num_seconds() as f64 / 86_400.0).max(0.0)
}

/// Fixed retention actions per tier, in priority order
fn retention_recommendations(tier: RiskTier) -> Vec<String> {
    let actions: &[&str] = match tier {
        RiskTier::High => &[
            "Reach out with a personal check-in message",
            "Offer a limited-time discount on a frequently purchased product",
            "Suggest a fresh beginner-friendly workout plan",
        ],
        RiskTier::Medium => &[
            "Send a re-engagement notification featuring new content",
            "Highlight this week's community challenges",
        ],
        RiskTier::Low => &["Keep the current cadence of content recommendations"],
    };
    actions.iter().map(|s| (*s).to_string()).collect()
}
