//! Composite health risk scoring over computed forecasts

use crate::constants::{metrics, thresholds};
use crate::models::{Forecast, HealthRiskReport, RiskTier};

/// Aggregates already-computed forecasts into a composite risk level
///
/// Pure rule evaluation: each rule contributes a fixed increment when its
/// threshold is crossed. Nothing is learned or fitted here.
pub struct HealthRiskScorer;

impl HealthRiskScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score the subject from metric forecasts and the projected activity
    /// score, when available
    pub fn score(
        &self,
        forecasts: &[Forecast],
        predicted_activity_score: Option<f64>,
    ) -> HealthRiskReport {
        let mut score = 0.0;
        let mut factors = Vec::new();

        if let Some(bmi) = forecasts
            .iter()
            .find(|f| f.metric_name == metrics::BMI)
        {
            if bmi.predicted_value > thresholds::HEALTH_BMI_HIGH {
                score += thresholds::HEALTH_BMI_HIGH_INCREMENT;
                factors.push(format!(
                    "projected BMI {:.1} above {:.0}",
                    bmi.predicted_value,
                    thresholds::HEALTH_BMI_HIGH
                ));
            } else if bmi.predicted_value >= thresholds::HEALTH_BMI_ELEVATED {
                score += thresholds::HEALTH_BMI_ELEVATED_INCREMENT;
                factors.push(format!(
                    "projected BMI {:.1} in the {:.0}-{:.0} range",
                    bmi.predicted_value,
                    thresholds::HEALTH_BMI_ELEVATED,
                    thresholds::HEALTH_BMI_HIGH
                ));
            }
        }

        if let Some(activity) = predicted_activity_score {
            if activity < thresholds::HEALTH_LOW_ACTIVITY_SCORE {
                score += thresholds::HEALTH_LOW_ACTIVITY_INCREMENT;
                factors.push(format!(
                    "projected activity score {:.1} below {:.0}",
                    activity,
                    thresholds::HEALTH_LOW_ACTIVITY_SCORE
                ));
            }
        }

        let score = score.clamp(0.0, 1.0);
        let tier = if score >= thresholds::HEALTH_TIER_HIGH {
            RiskTier::High
        } else if score >= thresholds::HEALTH_TIER_MEDIUM {
            RiskTier::Medium
        } else {
            RiskTier::Low
        };

        HealthRiskReport {
            score,
            tier,
            factors,
        }
    }
}

impl Default for HealthRiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendDirection;

    fn bmi_forecast(predicted: f64) -> Forecast {
        Forecast {
            metric_name: "bmi".to_string(),
            predicted_value: predicted,
            confidence: 90.0,
            trend: TrendDirection::Increasing,
            change_rate: 0.05,
        }
    }

    #[test]
    fn test_high_bmi_and_low_activity_tier_high() {
        let report = HealthRiskScorer::new().score(&[bmi_forecast(31.0)], Some(4.0));

        // 0.3 + 0.2 = 0.5 -> High
        assert!((report.score - 0.5).abs() < 1e-9);
        assert_eq!(report.tier, RiskTier::High);
        assert_eq!(report.factors.len(), 2);
    }

    #[test]
    fn test_elevated_bmi_tier_low() {
        let report = HealthRiskScorer::new().score(&[bmi_forecast(26.5)], Some(7.0));

        assert!((report.score - 0.1).abs() < 1e-9);
        assert_eq!(report.tier, RiskTier::Low);
    }

    #[test]
    fn test_low_activity_alone_tier_medium() {
        let report = HealthRiskScorer::new().score(&[], Some(3.0));

        assert!((report.score - 0.2).abs() < 1e-9);
        assert_eq!(report.tier, RiskTier::Medium);
    }

    #[test]
    fn test_healthy_subject_tier_low() {
        let report = HealthRiskScorer::new().score(&[bmi_forecast(22.0)], Some(8.0));

        assert_eq!(report.score, 0.0);
        assert_eq!(report.tier, RiskTier::Low);
        assert!(report.factors.is_empty());
    }

    #[test]
    fn test_bmi_boundary_values() {
        // Exactly 30 falls in the elevated band, not the high band
        let report = HealthRiskScorer::new().score(&[bmi_forecast(30.0)], None);
        assert!((report.score - 0.1).abs() < 1e-9);

        // Exactly 25 is elevated
        let report = HealthRiskScorer::new().score(&[bmi_forecast(25.0)], None);
        assert!((report.score - 0.1).abs() < 1e-9);

        // Just under 25 contributes nothing
        let report = HealthRiskScorer::new().score(&[bmi_forecast(24.9)], None);
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_non_bmi_forecasts_ignored() {
        let weight = Forecast {
            metric_name: "weight".to_string(),
            predicted_value: 95.0,
            confidence: 80.0,
            trend: TrendDirection::Increasing,
            change_rate: 0.2,
        };
        let report = HealthRiskScorer::new().score(&[weight], None);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.tier, RiskTier::Low);
    }
}
