//! Metric trend forecasting with ordinary least squares

use crate::constants::limits;
use crate::errors::AnalyticsError;
use crate::models::{Forecast, MetricSample, TrendDirection};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fits a single-variable linear trend to a metric series and projects a
/// future value
///
/// Confidence is the coefficient of determination (R²) of the fit scaled to
/// 0-100: a goodness-of-fit figure, not a statistical prediction interval.
/// That distinction is intentional; the simpler figure is what the product
/// surfaces.
pub struct TrendForecaster;

impl TrendForecaster {
    pub fn new() -> Self {
        Self
    }

    /// Forecast the metric `days_ahead` days past the newest sample
    ///
    /// Requires at least three samples (two degrees of freedom for the fit
    /// plus a slack sample). The series must be sorted ascending by
    /// timestamp, which the aggregator guarantees.
    pub fn forecast(
        &self,
        samples: &[MetricSample],
        days_ahead: u32,
    ) -> Result<Forecast, AnalyticsError> {
        if samples.len() < limits::MIN_SAMPLES_FOR_REGRESSION {
            return Err(AnalyticsError::insufficient(
                limits::MIN_SAMPLES_FOR_REGRESSION,
                samples.len(),
                "samples",
            ));
        }

        let t0 = samples[0].timestamp;
        let points: Vec<(f64, f64)> = samples
            .iter()
            .map(|s| {
                let day_offset = (s.timestamp - t0).num_seconds() as f64 / SECONDS_PER_DAY;
                (day_offset, s.value)
            })
            .collect();

        let n = points.len() as f64;
        let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
        let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
        let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
        let sum_x2: f64 = points.iter().map(|(x, _)| x * x).sum();

        let denominator = n * sum_x2 - sum_x * sum_x;
        // All samples at the same instant: the fit degenerates to a flat
        // line through the mean
        let (slope, intercept) = if denominator == 0.0 {
            (0.0, sum_y / n)
        } else {
            let slope = (n * sum_xy - sum_x * sum_y) / denominator;
            let intercept = (sum_y - slope * sum_x) / n;
            (slope, intercept)
        };

        let mean_y = sum_y / n;
        let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
        let r_squared = if ss_tot == 0.0 {
            // Zero variance: a degenerate but perfect fit
            1.0
        } else {
            let ss_res: f64 = points
                .iter()
                .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
                .sum();
            1.0 - ss_res / ss_tot
        };
        let confidence = (r_squared * 100.0).clamp(0.0, 100.0);

        let max_offset = points
            .iter()
            .map(|(x, _)| *x)
            .fold(0.0_f64, f64::max);
        let predicted_value = slope * (max_offset + f64::from(days_ahead)) + intercept;

        let trend = if slope > 0.0 {
            TrendDirection::Increasing
        } else if slope < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };

        Ok(Forecast {
            metric_name: samples[0].metric_name.clone(),
            predicted_value,
            confidence,
            trend,
            change_rate: slope,
        })
    }
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn series(points: &[(i64, f64)]) -> Vec<MetricSample> {
        let subject = Uuid::new_v4();
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        points
            .iter()
            .map(|(day, value)| MetricSample {
                subject_id: subject,
                metric_name: "weight".to_string(),
                timestamp: t0 + Duration::days(*day),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn test_exact_linear_series() {
        // value = -0.1 * day + 70
        let samples = series(&[(0, 70.0), (10, 69.0), (20, 68.0)]);
        let forecast = TrendForecaster::new().forecast(&samples, 30).unwrap();

        assert!((forecast.change_rate - (-0.1)).abs() < 1e-9);
        // Day 50 projection: 70 - 5 = 65
        assert!((forecast.predicted_value - 65.0).abs() < 1e-9);
        assert_eq!(forecast.trend, TrendDirection::Decreasing);
        assert!((forecast.confidence - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_increasing_series() {
        let samples = series(&[(0, 60.0), (7, 61.0), (14, 62.0), (21, 63.0)]);
        let forecast = TrendForecaster::new().forecast(&samples, 7).unwrap();

        assert_eq!(forecast.trend, TrendDirection::Increasing);
        assert!((forecast.change_rate - (1.0 / 7.0)).abs() < 1e-9);
        assert!((forecast.predicted_value - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_samples_is_failure_not_panic() {
        let samples = series(&[(0, 70.0), (10, 69.0)]);
        let result = TrendForecaster::new().forecast(&samples, 30);
        assert!(matches!(
            result,
            Err(AnalyticsError::InsufficientData { needed: 3, got: 2, .. })
        ));
    }

    #[test]
    fn test_zero_variance_series_has_full_confidence() {
        let samples = series(&[(0, 70.0), (5, 70.0), (10, 70.0)]);
        let forecast = TrendForecaster::new().forecast(&samples, 30).unwrap();

        assert_eq!(forecast.trend, TrendDirection::Stable);
        assert!((forecast.confidence - 100.0).abs() < 1e-9);
        assert!((forecast.predicted_value - 70.0).abs() < 1e-9);
        assert_eq!(forecast.change_rate, 0.0);
    }

    #[test]
    fn test_noisy_series_has_reduced_confidence() {
        let samples = series(&[(0, 70.0), (5, 75.0), (10, 66.0), (15, 73.0), (20, 68.0)]);
        let forecast = TrendForecaster::new().forecast(&samples, 10).unwrap();

        assert!(forecast.confidence < 60.0);
        assert!(forecast.confidence >= 0.0);
    }

    #[test]
    fn test_fractional_day_offsets() {
        let subject = Uuid::new_v4();
        let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        // Samples 12 hours apart, rising 0.5 per half-day: slope 1.0/day
        let samples: Vec<MetricSample> = (0..4)
            .map(|i| MetricSample {
                subject_id: subject,
                metric_name: "bmi".to_string(),
                timestamp: t0 + Duration::hours(12 * i),
                value: 20.0 + 0.5 * i as f64,
            })
            .collect();

        let forecast = TrendForecaster::new().forecast(&samples, 1).unwrap();
        assert!((forecast.change_rate - 1.0).abs() < 1e-9);
        // Max offset 1.5 days + 1 day horizon -> 20 + 2.5
        assert!((forecast.predicted_value - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let samples = series(&[(0, 70.0), (10, 69.2), (20, 68.1), (30, 67.9)]);
        let forecaster = TrendForecaster::new();
        let a = forecaster.forecast(&samples, 30).unwrap();
        let b = forecaster.forecast(&samples, 30).unwrap();
        assert_eq!(a.predicted_value, b.predicted_value);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.change_rate, b.change_rate);
    }
}
