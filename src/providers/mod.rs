// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Data-access boundary for the analytics engine
//!
//! The scoring components never touch the network: everything they consume
//! arrives through the traits below. The hosted data-store adapter and the
//! in-memory fixture provider are the two implementations shipped with the
//! crate.

use crate::config::AnalyticsConfig;
use crate::models::{
    BehaviorDomain, BehaviorEvent, EngagementEvent, ExerciseSession, MetricRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub mod datastore;
pub mod memory;

/// Errors raised by provider implementations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("data-store returned status {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The store answered with a payload that did not decode
    #[error("failed to decode data-store response: {0}")]
    Decode(String),

    /// The provider was constructed with unusable settings
    #[error("invalid provider configuration: {0}")]
    Config(String),
}

/// Read access to per-subject metric history
#[async_trait]
pub trait HistoricalRecordProvider: Send + Sync {
    /// Fetch all observations of `metric_name` for a subject since the given
    /// instant. Order is unspecified; an empty vector is a valid answer.
    async fn get_metric_history(
        &self,
        subject_id: Uuid,
        metric_name: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<MetricRecord>, ProviderError>;
}

/// Read access to engagement signals
#[async_trait]
pub trait EngagementProvider: Send + Sync {
    /// Engagement events since the given instant
    async fn get_recent_activity(
        &self,
        subject_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<EngagementEvent>, ProviderError>;

    /// The subject's most recent login, if any
    async fn get_last_login(
        &self,
        subject_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, ProviderError>;

    /// Completed workout sessions since the given instant
    async fn get_exercise_sessions(
        &self,
        subject_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<ExerciseSession>, ProviderError>;
}

/// Read access to domain-specific behavior events
#[async_trait]
pub trait BehaviorEventProvider: Send + Sync {
    /// Events for one behavior domain since the given instant
    async fn get_events(
        &self,
        subject_id: Uuid,
        domain: BehaviorDomain,
        since: DateTime<Utc>,
    ) -> Result<Vec<BehaviorEvent>, ProviderError>;
}

/// Everything the analytics engine needs from a data source
pub trait AnalyticsDataProvider:
    HistoricalRecordProvider + EngagementProvider + BehaviorEventProvider
{
}

impl<T> AnalyticsDataProvider for T where
    T: HistoricalRecordProvider + EngagementProvider + BehaviorEventProvider
{
}

/// Construct a provider by kind
pub fn create_provider(
    provider_type: &str,
    config: &AnalyticsConfig,
) -> Result<Box<dyn AnalyticsDataProvider>, ProviderError> {
    match provider_type.to_lowercase().as_str() {
        "datastore" => Ok(Box::new(datastore::DatastoreProvider::new(&config.datastore)?)),
        "memory" => Ok(Box::new(memory::MemoryProvider::new())),
        other => Err(ProviderError::Config(format!(
            "Unknown provider: {}. Currently supported: datastore, memory",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatastoreConfig;

    fn config() -> AnalyticsConfig {
        AnalyticsConfig {
            datastore: DatastoreConfig {
                base_url: "http://store.test.local/api/v1".to_string(),
                api_key: None,
                timeout_secs: 5,
            },
            forecast_horizon_days: 30,
        }
    }

    #[tokio::test]
    async fn test_create_provider_by_kind() {
        let provider = create_provider("memory", &config()).unwrap();
        // The boxed provider answers through the supertrait
        let records = provider
            .get_metric_history(Uuid::new_v4(), "weight", Utc::now())
            .await
            .unwrap();
        assert!(records.is_empty());

        assert!(create_provider("datastore", &config()).is_ok());
    }

    #[test]
    fn test_create_provider_unknown_kind() {
        let result = create_provider("csv", &config());
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }
}
