// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Request facade over the analytics components
//!
//! The single place where I/O meets the pure core: each operation fetches
//! through the provider, runs the relevant components over the fetched
//! records, and wraps the outcome in the boundary envelope. Operations for
//! different subjects share nothing and may run fully in parallel.

use super::{
    ActivityTrendAnalyzer, AnalysisResponse, CadencePredictor, ChurnRiskScorer,
    HealthRiskScorer, InterventionRecommender, RecordAggregator, SeasonalTrendEngine,
    TrendForecaster,
};
use crate::config::AnalyticsConfig;
use crate::constants::{limits, metrics};
use crate::errors::AnalyticsError;
use crate::logging::AppLogger;
use crate::models::{
    ActivityTrendReport, BehaviorDomain, CadencePrediction, ChurnAssessment, Forecast,
    HealthRiskReport, InterventionCandidate, SeasonalOutlook,
};
use crate::providers::AnalyticsDataProvider;
use chrono::{Duration, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::warn;
use uuid::Uuid;

/// Combined health view: per-metric forecasts, activity trend and the
/// composite risk built from both
#[derive(Debug, Clone, Serialize)]
pub struct HealthOutlook {
    pub forecasts: Vec<Forecast>,
    pub activity: ActivityTrendReport,
    pub risk: HealthRiskReport,
}

/// Stateless per-request engine over a data provider
pub struct PredictiveAnalyticsEngine<P> {
    provider: P,
    config: AnalyticsConfig,
    aggregator: RecordAggregator,
    forecaster: TrendForecaster,
    activity: ActivityTrendAnalyzer,
    health_risk: HealthRiskScorer,
    churn: ChurnRiskScorer,
    cadence: CadencePredictor,
    seasonal: SeasonalTrendEngine,
    interventions: InterventionRecommender,
}

impl<P: AnalyticsDataProvider> PredictiveAnalyticsEngine<P> {
    pub fn new(provider: P, config: AnalyticsConfig) -> Self {
        Self {
            provider,
            config,
            aggregator: RecordAggregator::new(),
            forecaster: TrendForecaster::new(),
            activity: ActivityTrendAnalyzer::new(),
            health_risk: HealthRiskScorer::new(),
            churn: ChurnRiskScorer::new(),
            cadence: CadencePredictor::new(),
            seasonal: SeasonalTrendEngine::new(),
            interventions: InterventionRecommender::new(),
        }
    }

    /// Forecast one metric `days_ahead` days out
    pub async fn forecast_metric(
        &self,
        subject_id: Uuid,
        metric_name: &str,
        days_ahead: u32,
    ) -> AnalysisResponse<Forecast> {
        let started = Instant::now();
        let result = self
            .forecast_metric_inner(subject_id, metric_name, days_ahead)
            .await;
        self.log_outcome(subject_id, "forecast_metric", &result, started);
        result.into()
    }

    async fn forecast_metric_inner(
        &self,
        subject_id: Uuid,
        metric_name: &str,
        days_ahead: u32,
    ) -> Result<Forecast, AnalyticsError> {
        let since = Utc::now() - Duration::days(limits::HISTORY_WINDOW_DAYS);
        let histories = self
            .aggregator
            .fetch(&self.provider, subject_id, &[metric_name], since)
            .await?;

        let samples = histories.get(metric_name).map(Vec::as_slice).unwrap_or(&[]);
        self.forecaster.forecast(samples, days_ahead)
    }

    /// Forecast the standard health metrics and fold them into a composite
    /// risk level
    pub async fn health_outlook(&self, subject_id: Uuid) -> AnalysisResponse<HealthOutlook> {
        let started = Instant::now();
        let result = self.health_outlook_inner(subject_id).await;
        self.log_outcome(subject_id, "health_outlook", &result, started);
        result.into()
    }

    async fn health_outlook_inner(
        &self,
        subject_id: Uuid,
    ) -> Result<HealthOutlook, AnalyticsError> {
        let now = Utc::now();
        let since = now - Duration::days(limits::HISTORY_WINDOW_DAYS);
        let horizon = self.config.forecast_horizon_days;

        let histories = self
            .aggregator
            .fetch(
                &self.provider,
                subject_id,
                &[metrics::WEIGHT, metrics::BMI],
                since,
            )
            .await?;

        // Forecast whichever metrics had enough history; a thin series is
        // not an error for the combined view
        let mut forecasts = Vec::new();
        for samples in histories.values() {
            if let Ok(forecast) = self.forecaster.forecast(samples, horizon) {
                forecasts.push(forecast);
            }
        }
        forecasts.sort_by(|a, b| a.metric_name.cmp(&b.metric_name));

        let sessions = self
            .provider
            .get_exercise_sessions(
                subject_id,
                now - Duration::days(limits::ANALYSIS_WINDOW_DAYS),
            )
            .await?;
        let activity = self.activity.analyze(&sessions, now);

        let risk = self
            .health_risk
            .score(&forecasts, Some(activity.predicted_activity_score));

        Ok(HealthOutlook {
            forecasts,
            activity,
            risk,
        })
    }

    /// Score the activity trend for the trailing 30 days
    pub async fn activity_trend(
        &self,
        subject_id: Uuid,
    ) -> AnalysisResponse<ActivityTrendReport> {
        let started = Instant::now();
        let result = self.activity_trend_inner(subject_id).await;
        self.log_outcome(subject_id, "activity_trend", &result, started);
        result.into()
    }

    async fn activity_trend_inner(
        &self,
        subject_id: Uuid,
    ) -> Result<ActivityTrendReport, AnalyticsError> {
        let now = Utc::now();
        let sessions = self
            .provider
            .get_exercise_sessions(
                subject_id,
                now - Duration::days(limits::ANALYSIS_WINDOW_DAYS),
            )
            .await?;
        Ok(self.activity.analyze(&sessions, now))
    }

    /// Assess churn risk from engagement recency and frequency
    pub async fn churn_risk(&self, subject_id: Uuid) -> AnalysisResponse<ChurnAssessment> {
        let started = Instant::now();
        let result = self.churn_risk_inner(subject_id).await;
        self.log_outcome(subject_id, "churn_risk", &result, started);
        result.into()
    }

    async fn churn_risk_inner(
        &self,
        subject_id: Uuid,
    ) -> Result<ChurnAssessment, AnalyticsError> {
        let now = Utc::now();
        let since = now - Duration::days(limits::ANALYSIS_WINDOW_DAYS);

        let events = self.provider.get_recent_activity(subject_id, since).await?;
        let last_login = self.provider.get_last_login(subject_id).await?;

        let snapshot = self.churn.derive_snapshot(&events, last_login, now);
        Ok(self.churn.assess(&snapshot))
    }

    /// Project the next expected event for a behavior domain
    pub async fn behavior_cadence(
        &self,
        subject_id: Uuid,
        domain: BehaviorDomain,
    ) -> AnalysisResponse<CadencePrediction> {
        let started = Instant::now();
        let result = self.behavior_cadence_inner(subject_id, domain).await;
        self.log_outcome(subject_id, "behavior_cadence", &result, started);
        result.into()
    }

    async fn behavior_cadence_inner(
        &self,
        subject_id: Uuid,
        domain: BehaviorDomain,
    ) -> Result<CadencePrediction, AnalyticsError> {
        let since = Utc::now() - Duration::days(limits::HISTORY_WINDOW_DAYS);
        let events = self.provider.get_events(subject_id, domain, since).await?;
        self.cadence.predict(domain, &events)
    }

    /// Bucket the past year of wellness history by season and project the
    /// next season
    pub async fn seasonal_outlook(
        &self,
        subject_id: Uuid,
    ) -> AnalysisResponse<SeasonalOutlook> {
        let started = Instant::now();
        let result = self.seasonal_outlook_inner(subject_id).await;
        self.log_outcome(subject_id, "seasonal_outlook", &result, started);
        result.into()
    }

    async fn seasonal_outlook_inner(
        &self,
        subject_id: Uuid,
    ) -> Result<SeasonalOutlook, AnalyticsError> {
        let now = Utc::now();
        let since = now - Duration::days(limits::SEASONAL_WINDOW_DAYS);

        let histories = self
            .aggregator
            .fetch(
                &self.provider,
                subject_id,
                &metrics::SEASONAL_METRICS,
                since,
            )
            .await?;

        Ok(self.seasonal.outlook(&histories, now))
    }

    /// Derive the subject's pattern snapshot and rank interventions
    pub async fn recommend_interventions(
        &self,
        subject_id: Uuid,
    ) -> AnalysisResponse<Vec<InterventionCandidate>> {
        let started = Instant::now();
        let result = self.recommend_interventions_inner(subject_id).await;
        self.log_outcome(subject_id, "recommend_interventions", &result, started);
        result.into()
    }

    async fn recommend_interventions_inner(
        &self,
        subject_id: Uuid,
    ) -> Result<Vec<InterventionCandidate>, AnalyticsError> {
        let now = Utc::now();
        let since = now - Duration::days(limits::ANALYSIS_WINDOW_DAYS);

        let sessions = self
            .provider
            .get_exercise_sessions(subject_id, since)
            .await?;
        let nutrition_events = self
            .provider
            .get_events(subject_id, BehaviorDomain::Nutrition, since)
            .await?;

        let hydration = self
            .aggregator
            .fetch(
                &self.provider,
                subject_id,
                &[metrics::HYDRATION_LEVEL],
                since,
            )
            .await?;
        let hydration_samples = hydration
            .get(metrics::HYDRATION_LEVEL)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let pattern = self.interventions.derive_pattern(
            &sessions,
            nutrition_events.len(),
            hydration_samples,
            now,
        );
        Ok(self.interventions.recommend(&pattern))
    }

    fn log_outcome<T>(
        &self,
        subject_id: Uuid,
        operation: &str,
        result: &Result<T, AnalyticsError>,
        started: Instant,
    ) {
        let duration_ms = started.elapsed().as_millis() as u64;
        AppLogger::log_analysis(
            &subject_id.to_string(),
            operation,
            result.is_ok(),
            duration_ms,
        );
        if let Err(err) = result {
            warn!(
                subject.id = %subject_id,
                analysis.operation = %operation,
                analysis.error = %err,
                "analysis failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatastoreConfig;
    use crate::models::{EngagementEvent, ExerciseSession, MetricRecord, RiskTier};
    use crate::providers::memory::MemoryProvider;

    fn test_config() -> AnalyticsConfig {
        AnalyticsConfig {
            datastore: DatastoreConfig {
                base_url: "http://store.test.local/api/v1".to_string(),
                api_key: None,
                timeout_secs: 5,
            },
            forecast_horizon_days: 30,
        }
    }

    fn engine(provider: MemoryProvider) -> PredictiveAnalyticsEngine<MemoryProvider> {
        PredictiveAnalyticsEngine::new(provider, test_config())
    }

    #[tokio::test]
    async fn test_forecast_metric_success_envelope() {
        let subject = Uuid::new_v4();
        let now = Utc::now();
        let mut provider = MemoryProvider::new();
        provider.add_metric_records(
            subject,
            "weight",
            vec![
                MetricRecord { timestamp: now - Duration::days(20), value: 70.0 },
                MetricRecord { timestamp: now - Duration::days(10), value: 69.0 },
                MetricRecord { timestamp: now, value: 68.0 },
            ],
        );

        let response = engine(provider).forecast_metric(subject, "weight", 30).await;
        assert!(response.success);
        let forecast = response.data.unwrap();
        assert!((forecast.change_rate - (-0.1)).abs() < 1e-6);
        assert!((forecast.predicted_value - 65.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_forecast_metric_insufficient_data_envelope() {
        let subject = Uuid::new_v4();
        let provider = MemoryProvider::new();

        let response = engine(provider).forecast_metric(subject, "weight", 30).await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("insufficient data"));
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_upstream_failure_envelope() {
        let subject = Uuid::new_v4();
        let mut provider = MemoryProvider::new();
        provider.fail_with_status(503);

        let response = engine(provider).forecast_metric(subject, "weight", 30).await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("data source unavailable"));
    }

    #[tokio::test]
    async fn test_churn_risk_for_dormant_subject() {
        let subject = Uuid::new_v4();
        let provider = MemoryProvider::new();

        let response = engine(provider).churn_risk(subject).await;
        assert!(response.success);
        let assessment = response.data.unwrap();
        assert_eq!(assessment.risk_tier, RiskTier::High);
    }

    #[tokio::test]
    async fn test_churn_risk_for_active_subject() {
        let subject = Uuid::new_v4();
        let now = Utc::now();
        let mut provider = MemoryProvider::new();
        provider.add_engagement_events(
            subject,
            (0..20)
                .map(|d| EngagementEvent {
                    occurred_at: now - Duration::days(d) - Duration::hours(1),
                    kind: "workout_logged".to_string(),
                })
                .collect(),
        );
        provider.set_last_login(subject, now - Duration::hours(6));

        let response = engine(provider).churn_risk(subject).await;
        let assessment = response.data.unwrap();
        assert_eq!(assessment.risk_tier, RiskTier::Low);
        assert_eq!(assessment.score, 0.0);
    }

    #[tokio::test]
    async fn test_activity_trend_zero_data_still_succeeds() {
        let subject = Uuid::new_v4();
        let provider = MemoryProvider::new();

        let response = engine(provider).activity_trend(subject).await;
        assert!(response.success);
        let report = response.data.unwrap();
        assert_eq!(report.activity_score, 2.0);
        assert_eq!(report.confidence, 50.0);
    }

    #[tokio::test]
    async fn test_health_outlook_combines_components() {
        let subject = Uuid::new_v4();
        let now = Utc::now();
        let mut provider = MemoryProvider::new();
        provider.add_metric_records(
            subject,
            "bmi",
            vec![
                MetricRecord { timestamp: now - Duration::days(60), value: 29.0 },
                MetricRecord { timestamp: now - Duration::days(30), value: 30.0 },
                MetricRecord { timestamp: now, value: 31.0 },
            ],
        );
        provider.add_exercise_sessions(
            subject,
            vec![ExerciseSession {
                completed_at: now - Duration::days(2),
                duration_minutes: 30.0,
            }],
        );

        let response = engine(provider).health_outlook(subject).await;
        assert!(response.success);
        let outlook = response.data.unwrap();

        assert_eq!(outlook.forecasts.len(), 1);
        assert_eq!(outlook.forecasts[0].metric_name, "bmi");
        // Rising BMI projection plus a weak activity score
        assert_eq!(outlook.risk.tier, RiskTier::High);
        assert!(!outlook.risk.factors.is_empty());
    }
}
