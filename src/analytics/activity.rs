//! Activity scoring and short-term trend classification

use crate::constants::{defaults, limits, messages};
use crate::models::{ActivityTrendReport, ExerciseSession, TrendDirection};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

/// Derives a bounded 0-10 activity score from workout frequency and duration
///
/// Takes an explicit `as_of` anchor instead of reading the clock, so the
/// result is a pure function of its inputs.
pub struct ActivityTrendAnalyzer;

impl ActivityTrendAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score the trailing 30-day window ending at `as_of`
    ///
    /// This component always returns a usable result: a subject with no
    /// sessions gets the documented low-default score and a coaching
    /// message, not an error.
    pub fn analyze(
        &self,
        sessions: &[ExerciseSession],
        as_of: DateTime<Utc>,
    ) -> ActivityTrendReport {
        let window_start = as_of - Duration::days(limits::ANALYSIS_WINDOW_DAYS);
        let window: Vec<&ExerciseSession> = sessions
            .iter()
            .filter(|s| s.completed_at >= window_start && s.completed_at <= as_of)
            .collect();

        if window.is_empty() {
            return ActivityTrendReport {
                activity_score: defaults::ZERO_DATA_ACTIVITY_SCORE,
                predicted_activity_score: defaults::ZERO_DATA_ACTIVITY_SCORE,
                weekly_frequency: 0.0,
                average_duration_minutes: 0.0,
                trend: TrendDirection::Stable,
                confidence: defaults::ZERO_DATA_ACTIVITY_CONFIDENCE,
                coaching_message: Some(messages::ZERO_DATA_COACHING.to_string()),
            };
        }

        let distinct_days: HashSet<_> =
            window.iter().map(|s| s.completed_at.date_naive()).collect();
        let weekly_frequency =
            distinct_days.len() as f64 / limits::ANALYSIS_WINDOW_DAYS as f64 * 7.0;

        let average_duration_minutes =
            window.iter().map(|s| s.duration_minutes).sum::<f64>() / window.len() as f64;

        let frequency_score = (weekly_frequency / 7.0 * 5.0).min(5.0);
        let duration_score = (average_duration_minutes / 60.0 * 5.0).min(5.0);
        let activity_score = (frequency_score + duration_score).clamp(0.0, 10.0);

        let trend = self.classify_trend(&window, as_of);

        let predicted_activity_score = match trend {
            TrendDirection::Increasing => {
                (activity_score * (1.0 + defaults::ACTIVITY_PROJECTION_ADJUSTMENT)).min(10.0)
            }
            TrendDirection::Decreasing => {
                activity_score * (1.0 - defaults::ACTIVITY_PROJECTION_ADJUSTMENT)
            }
            TrendDirection::Stable => activity_score,
        };

        let confidence = (window.len() as f64 / limits::ANALYSIS_WINDOW_DAYS as f64 * 100.0)
            .min(limits::MAX_ACTIVITY_CONFIDENCE);

        ActivityTrendReport {
            activity_score,
            predicted_activity_score,
            weekly_frequency,
            average_duration_minutes,
            trend,
            confidence,
            coaching_message: None,
        }
    }

    /// Compare the last 7 days against the rest of the window
    ///
    /// Fewer than 7 sessions in total is not enough signal to call a
    /// direction either way.
    fn classify_trend(
        &self,
        window: &[&ExerciseSession],
        as_of: DateTime<Utc>,
    ) -> TrendDirection {
        if window.len() < limits::MIN_SESSIONS_FOR_TREND {
            return TrendDirection::Stable;
        }

        let recent_start = as_of - Duration::days(limits::RECENT_WINDOW_DAYS);
        let (recent, older): (Vec<&&ExerciseSession>, Vec<&&ExerciseSession>) =
            window.iter().partition(|s| s.completed_at >= recent_start);

        if recent.is_empty() || older.is_empty() {
            return TrendDirection::Stable;
        }

        let older_days =
            (limits::ANALYSIS_WINDOW_DAYS - limits::RECENT_WINDOW_DAYS) as f64;
        let recent_rate = recent.len() as f64 / limits::RECENT_WINDOW_DAYS as f64;
        let older_rate = older.len() as f64 / older_days;

        let recent_duration =
            recent.iter().map(|s| s.duration_minutes).sum::<f64>() / recent.len() as f64;
        let older_duration =
            older.iter().map(|s| s.duration_minutes).sum::<f64>() / older.len() as f64;

        if recent_rate > older_rate || recent_duration > older_duration {
            TrendDirection::Increasing
        } else if recent_rate < older_rate && recent_duration < older_duration {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }
}

impl Default for ActivityTrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
