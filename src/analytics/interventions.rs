//! Priority-ordered intervention recommendations

use crate::constants::{defaults, limits, thresholds};
use crate::models::{
    ExerciseSession, InterventionCandidate, InterventionPriority, MetricSample, UserPattern,
};
use chrono::{DateTime, Duration, Utc};

/// Scans a subject's pattern snapshot and emits improvement actions
///
/// Rules are independent; any subset may fire. The final list is sorted by
/// the explicit priority ordinal (High=2, Medium=1, Low=0), never by the
/// label string.
pub struct InterventionRecommender;

impl InterventionRecommender {
    pub fn new() -> Self {
        Self
    }

    /// Derive the pattern snapshot for the trailing 30-day window
    ///
    /// Sleep quality is inferred from exercise frequency because the
    /// platform has no direct sleep data source; hydration falls back to a
    /// fixed default when the subject never used the hydration calculator.
    /// Both are inherited product policies.
    pub fn derive_pattern(
        &self,
        sessions: &[ExerciseSession],
        nutrition_log_count: usize,
        hydration_history: &[MetricSample],
        as_of: DateTime<Utc>,
    ) -> UserPattern {
        let window_start = as_of - Duration::days(limits::ANALYSIS_WINDOW_DAYS);
        let session_count = sessions
            .iter()
            .filter(|s| s.completed_at >= window_start && s.completed_at <= as_of)
            .count();

        let exercise_frequency =
            session_count as f64 / limits::ANALYSIS_WINDOW_DAYS as f64 * 7.0;

        let nutrition_score =
            (nutrition_log_count as f64 / defaults::NUTRITION_LOGS_FOR_FULL_SCORE * 100.0)
                .min(100.0);

        let sleep_quality = (defaults::SLEEP_PROXY_BASE
            + defaults::SLEEP_PROXY_PER_WEEKLY_SESSION * exercise_frequency)
            .clamp(0.0, 10.0);

        let hydration_level = if hydration_history.is_empty() {
            defaults::DEFAULT_HYDRATION_LEVEL
        } else {
            hydration_history.iter().map(|s| s.value).sum::<f64>()
                / hydration_history.len() as f64
        };

        UserPattern {
            exercise_frequency,
            nutrition_score,
            sleep_quality,
            hydration_level,
        }
    }

    /// Evaluate every rule against the pattern and sort by priority
    pub fn recommend(&self, pattern: &UserPattern) -> Vec<InterventionCandidate> {
        let mut candidates = Vec::new();

        if pattern.exercise_frequency < thresholds::INTERVENTION_EXERCISE_WEEKLY_MIN {
            candidates.push(InterventionCandidate {
                intervention_type: "exercise".to_string(),
                priority: InterventionPriority::High,
                title: "Build a Regular Exercise Habit".to_string(),
                description: "Fewer than three workouts a week leaves most fitness goals out of reach.".to_string(),
                recommended_actions: vec![
                    "Schedule three 30-minute sessions on fixed weekdays".to_string(),
                    "Start with low-intensity workouts you can finish".to_string(),
                    "Enable workout reminders in the app".to_string(),
                ],
                expected_impact: "Noticeably higher energy and progress toward goals within four weeks".to_string(),
            });
        }

        if pattern.nutrition_score < thresholds::INTERVENTION_NUTRITION_MIN {
            candidates.push(InterventionCandidate {
                intervention_type: "nutrition".to_string(),
                priority: InterventionPriority::High,
                title: "Log Meals Consistently".to_string(),
                description: "Sparse nutrition logging makes intake impossible to assess or improve.".to_string(),
                recommended_actions: vec![
                    "Log every meal for the next seven days".to_string(),
                    "Use the barcode scanner to speed up entries".to_string(),
                    "Review the weekly nutrition summary each Sunday".to_string(),
                ],
                expected_impact: "A complete picture of intake within one week of consistent logging".to_string(),
            });
        }

        if pattern.sleep_quality < thresholds::INTERVENTION_SLEEP_MIN {
            candidates.push(InterventionCandidate {
                intervention_type: "sleep".to_string(),
                priority: InterventionPriority::Medium,
                title: "Improve Sleep Routine".to_string(),
                description: "Estimated sleep quality is below the recovery range.".to_string(),
                recommended_actions: vec![
                    "Set a consistent bedtime and wake time".to_string(),
                    "Avoid screens for 30 minutes before bed".to_string(),
                    "Keep intense workouts out of the last two hours of the day".to_string(),
                ],
                expected_impact: "Better recovery and daytime energy within two weeks".to_string(),
            });
        }

        if pattern.hydration_level < thresholds::INTERVENTION_HYDRATION_MIN {
            candidates.push(InterventionCandidate {
                intervention_type: "hydration".to_string(),
                priority: InterventionPriority::Medium,
                title: "Raise Daily Water Intake".to_string(),
                description: "Hydration is tracking below the recommended level.".to_string(),
                recommended_actions: vec![
                    "Keep a filled bottle within reach during the day".to_string(),
                    "Use the hydration calculator to set a daily target".to_string(),
                    "Drink a glass of water with every meal".to_string(),
                ],
                expected_impact: "Improved workout performance and fewer energy dips".to_string(),
            });
        }

        // Stable sort keeps rule-evaluation order within a priority band
        candidates.sort_by(|a, b| b.priority.ordinal().cmp(&a.priority.ordinal()));
        candidates
    }
}

impl Default for InterventionRecommender {
    fn default() -> Self {
        Self::new()
    }
}
