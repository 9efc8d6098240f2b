// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! REST adapter for the hosted data-store
//!
//! Thin client over the platform's record-store API. Retry and rate-limit
//! policy live with the store's own gateway; this adapter only authenticates,
//! fetches and decodes.

use super::{
    BehaviorEventProvider, EngagementProvider, HistoricalRecordProvider, ProviderError,
};
use crate::config::DatastoreConfig;
use crate::models::{
    BehaviorDomain, BehaviorEvent, EngagementEvent, ExerciseSession, MetricRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;
use uuid::Uuid;

pub struct DatastoreProvider {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl DatastoreProvider {
    /// Build a provider from connection settings
    pub fn new(config: &DatastoreConfig) -> Result<Self, ProviderError> {
        // Trailing slash so Url::join treats the base as a directory
        let normalized = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ProviderError::Config(format!("invalid base URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ProviderError::Config(format!("invalid endpoint path: {}", e)))?;

        debug!(endpoint = %path, "data-store request");

        let mut request = self.client.get(url).query(query);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct MetricRow {
    timestamp: DateTime<Utc>,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct EngagementRow {
    occurred_at: DateTime<Utc>,
    kind: String,
}

#[derive(Debug, Deserialize)]
struct SessionRow {
    completed_at: DateTime<Utc>,
    duration_minutes: f64,
}

#[derive(Debug, Deserialize)]
struct BehaviorRow {
    occurred_at: DateTime<Utc>,
    quantity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LastLoginRow {
    last_login: Option<DateTime<Utc>>,
}

impl From<MetricRow> for MetricRecord {
    fn from(row: MetricRow) -> Self {
        Self {
            timestamp: row.timestamp,
            value: row.value,
        }
    }
}

#[async_trait]
impl HistoricalRecordProvider for DatastoreProvider {
    async fn get_metric_history(
        &self,
        subject_id: Uuid,
        metric_name: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<MetricRecord>, ProviderError> {
        let rows: Vec<MetricRow> = self
            .get_json(
                &format!("subjects/{}/metrics/{}", subject_id, metric_name),
                &[("since", since.to_rfc3339())],
            )
            .await?;

        Ok(rows.into_iter().map(MetricRecord::from).collect())
    }
}

#[async_trait]
impl EngagementProvider for DatastoreProvider {
    async fn get_recent_activity(
        &self,
        subject_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<EngagementEvent>, ProviderError> {
        let rows: Vec<EngagementRow> = self
            .get_json(
                &format!("subjects/{}/activity", subject_id),
                &[("since", since.to_rfc3339())],
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| EngagementEvent {
                occurred_at: r.occurred_at,
                kind: r.kind,
            })
            .collect())
    }

    async fn get_last_login(
        &self,
        subject_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, ProviderError> {
        let row: LastLoginRow = self
            .get_json(&format!("subjects/{}/last-login", subject_id), &[])
            .await?;

        Ok(row.last_login)
    }

    async fn get_exercise_sessions(
        &self,
        subject_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<ExerciseSession>, ProviderError> {
        let rows: Vec<SessionRow> = self
            .get_json(
                &format!("subjects/{}/sessions", subject_id),
                &[("since", since.to_rfc3339())],
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| ExerciseSession {
                completed_at: r.completed_at,
                duration_minutes: r.duration_minutes,
            })
            .collect())
    }
}

#[async_trait]
impl BehaviorEventProvider for DatastoreProvider {
    async fn get_events(
        &self,
        subject_id: Uuid,
        domain: BehaviorDomain,
        since: DateTime<Utc>,
    ) -> Result<Vec<BehaviorEvent>, ProviderError> {
        let rows: Vec<BehaviorRow> = self
            .get_json(
                &format!("subjects/{}/events/{}", subject_id, domain.as_str()),
                &[("since", since.to_rfc3339())],
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| BehaviorEvent {
                occurred_at: r.occurred_at,
                quantity: r.quantity,
            })
            .collect())
    }
}
