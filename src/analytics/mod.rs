// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Analytics Module
//!
//! The predictive analytics core: every scoring component plus the request
//! facade that wires them over a data provider.
//!
//! This module includes:
//! - Historical record aggregation and normalization
//! - Metric trend forecasting with goodness-of-fit confidence
//! - Activity scoring and short-term trend classification
//! - Health and churn risk scoring
//! - Behavior cadence prediction
//! - Seasonal bucketing, backfill and projection
//! - Priority-ordered intervention recommendations
//!
//! Components below the facade are pure functions over data already in
//! memory; they can be exercised with fixtures and have no network or
//! database awareness.

use serde::Serialize;

pub mod activity;
pub mod aggregator;
pub mod cadence;
pub mod churn;
pub mod engine;
pub mod forecaster;
pub mod health_risk;
pub mod interventions;
pub mod seasonal;

pub use activity::ActivityTrendAnalyzer;
pub use aggregator::RecordAggregator;
pub use cadence::CadencePredictor;
pub use churn::ChurnRiskScorer;
pub use engine::{HealthOutlook, PredictiveAnalyticsEngine};
pub use forecaster::TrendForecaster;
pub use health_risk::HealthRiskScorer;
pub use interventions::InterventionRecommender;
pub use seasonal::SeasonalTrendEngine;

use crate::errors::AnalyticsError;

/// The envelope every public operation returns to the request layer
///
/// Success carries the component's result object; failure carries a
/// human-readable message. No other shape crosses the crate boundary.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse<T> {
    /// Whether the operation produced a result
    pub success: bool,
    /// The result object on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure message on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AnalysisResponse<T> {
    /// Successful envelope
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failure envelope
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<Result<T, AnalyticsError>> for AnalysisResponse<T> {
    fn from(result: Result<T, AnalyticsError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::err(err.user_message()),
        }
    }
}
