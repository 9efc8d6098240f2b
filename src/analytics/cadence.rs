//! Behavior cadence prediction from inter-event intervals

use crate::constants::{limits, thresholds};
use crate::errors::AnalyticsError;
use crate::models::{
    BehaviorDomain, BehaviorEvent, CadencePrediction, ConsistencyLevel, DomainStatistic,
};
use chrono::Duration;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Projects the next expected event for a behavior domain
///
/// The cadence is the mean gap between consecutive events in days; the next
/// event is projected one mean gap past the most recent event. A domain's
/// regularity is classified against fixed per-domain gap ceilings.
pub struct CadencePredictor;

impl CadencePredictor {
    pub fn new() -> Self {
        Self
    }

    /// Predict the next event; requires at least three events (two gaps)
    pub fn predict(
        &self,
        domain: BehaviorDomain,
        events: &[BehaviorEvent],
    ) -> Result<CadencePrediction, AnalyticsError> {
        if events.len() < limits::MIN_EVENTS_FOR_CADENCE {
            return Err(AnalyticsError::insufficient(
                limits::MIN_EVENTS_FOR_CADENCE,
                events.len(),
                "events",
            ));
        }

        let mut ordered: Vec<&BehaviorEvent> = events.iter().collect();
        ordered.sort_by_key(|e| e.occurred_at);

        let gaps: Vec<f64> = ordered
            .windows(2)
            .map(|pair| {
                (pair[1].occurred_at - pair[0].occurred_at).num_seconds() as f64
                    / SECONDS_PER_DAY
            })
            .collect();
        let average_gap_days = gaps.iter().sum::<f64>() / gaps.len() as f64;

        let last_event = ordered[ordered.len() - 1].occurred_at;
        let next_expected =
            last_event + Duration::seconds((average_gap_days * SECONDS_PER_DAY) as i64);

        Ok(CadencePrediction {
            domain,
            average_gap_days,
            next_expected,
            event_count: ordered.len(),
            statistic: secondary_statistic(domain, &ordered),
            consistency: classify_consistency(domain, average_gap_days),
        })
    }
}

impl Default for CadencePredictor {
    fn default() -> Self {
        Self::new()
    }
}

/// Mean of the domain's secondary quantity over the events that carry one
fn secondary_statistic(domain: BehaviorDomain, events: &[&BehaviorEvent]) -> DomainStatistic {
    let quantities: Vec<f64> = events.iter().filter_map(|e| e.quantity).collect();
    let value = if quantities.is_empty() {
        0.0
    } else {
        quantities.iter().sum::<f64>() / quantities.len() as f64
    };

    let label = match domain {
        BehaviorDomain::Purchases => "average_order_value",
        BehaviorDomain::Exercise => "average_session_minutes",
        BehaviorDomain::Nutrition => "average_meals_per_day",
    };

    DomainStatistic {
        label: label.to_string(),
        value,
    }
}

fn classify_consistency(domain: BehaviorDomain, average_gap_days: f64) -> ConsistencyLevel {
    let (high_ceiling, medium_ceiling) = match domain {
        BehaviorDomain::Purchases => (
            thresholds::CADENCE_PURCHASES_HIGH_GAP_DAYS,
            thresholds::CADENCE_PURCHASES_MEDIUM_GAP_DAYS,
        ),
        BehaviorDomain::Exercise => (
            thresholds::CADENCE_EXERCISE_HIGH_GAP_DAYS,
            thresholds::CADENCE_EXERCISE_MEDIUM_GAP_DAYS,
        ),
        BehaviorDomain::Nutrition => (
            thresholds::CADENCE_NUTRITION_HIGH_GAP_DAYS,
            thresholds::CADENCE_NUTRITION_MEDIUM_GAP_DAYS,
        ),
    };

    if average_gap_days <= high_ceiling {
        ConsistencyLevel::High
    } else if average_gap_days <= medium_ceiling {
        ConsistencyLevel::Medium
    } else {
        ConsistencyLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    fn event(days_from_anchor: i64, quantity: Option<f64>) -> BehaviorEvent {
        BehaviorEvent {
            occurred_at: anchor() + Duration::days(days_from_anchor),
            quantity,
        }
    }

    #[test]
    fn test_regular_weekly_purchases() {
        let events = vec![
            event(0, Some(45.0)),
            event(7, Some(55.0)),
            event(14, Some(50.0)),
        ];
        let prediction = CadencePredictor::new()
            .predict(BehaviorDomain::Purchases, &events)
            .unwrap();

        assert!((prediction.average_gap_days - 7.0).abs() < 1e-9);
        assert_eq!(prediction.next_expected, anchor() + Duration::days(21));
        assert_eq!(prediction.event_count, 3);
        assert_eq!(prediction.statistic.label, "average_order_value");
        assert!((prediction.statistic.value - 50.0).abs() < 1e-9);
        assert_eq!(prediction.consistency, ConsistencyLevel::High);
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let events = vec![
            event(14, Some(50.0)),
            event(0, Some(45.0)),
            event(7, Some(55.0)),
        ];
        let prediction = CadencePredictor::new()
            .predict(BehaviorDomain::Purchases, &events)
            .unwrap();

        assert!((prediction.average_gap_days - 7.0).abs() < 1e-9);
        assert_eq!(prediction.next_expected, anchor() + Duration::days(21));
    }

    #[test]
    fn test_two_events_insufficient() {
        let events = vec![event(0, None), event(3, None)];
        let result = CadencePredictor::new().predict(BehaviorDomain::Exercise, &events);
        assert!(matches!(
            result,
            Err(AnalyticsError::InsufficientData { needed: 3, got: 2, .. })
        ));
    }

    #[test]
    fn test_exercise_consistency_bands() {
        let predictor = CadencePredictor::new();

        // Every other day: high for exercise
        let events: Vec<BehaviorEvent> =
            (0..5).map(|i| event(i * 2, Some(40.0))).collect();
        let prediction = predictor.predict(BehaviorDomain::Exercise, &events).unwrap();
        assert_eq!(prediction.consistency, ConsistencyLevel::High);
        assert_eq!(prediction.statistic.label, "average_session_minutes");

        // Every three days: medium
        let events: Vec<BehaviorEvent> =
            (0..4).map(|i| event(i * 3, Some(40.0))).collect();
        let prediction = predictor.predict(BehaviorDomain::Exercise, &events).unwrap();
        assert_eq!(prediction.consistency, ConsistencyLevel::Medium);

        // Weekly: low for exercise
        let events: Vec<BehaviorEvent> =
            (0..4).map(|i| event(i * 7, Some(40.0))).collect();
        let prediction = predictor.predict(BehaviorDomain::Exercise, &events).unwrap();
        assert_eq!(prediction.consistency, ConsistencyLevel::Low);
    }

    #[test]
    fn test_missing_quantities_average_present_ones() {
        let events = vec![
            event(0, Some(3.0)),
            event(1, None),
            event(2, Some(2.0)),
            event(3, Some(4.0)),
        ];
        let prediction = CadencePredictor::new()
            .predict(BehaviorDomain::Nutrition, &events)
            .unwrap();

        assert_eq!(prediction.statistic.label, "average_meals_per_day");
        assert!((prediction.statistic.value - 3.0).abs() < 1e-9);
        assert_eq!(prediction.consistency, ConsistencyLevel::High);
    }

    #[test]
    fn test_irregular_gaps_average_out() {
        let events = vec![event(0, None), event(1, None), event(11, None)];
        let prediction = CadencePredictor::new()
            .predict(BehaviorDomain::Purchases, &events)
            .unwrap();

        // Gaps of 1 and 10 days -> mean 5.5
        assert!((prediction.average_gap_days - 5.5).abs() < 1e-9);
        assert_eq!(
            prediction.next_expected,
            anchor() + Duration::days(11) + Duration::seconds((5.5 * 86_400.0) as i64)
        );
    }
}
