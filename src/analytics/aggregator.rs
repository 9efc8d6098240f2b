// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Historical record aggregation and normalization

use crate::errors::AnalyticsError;
use crate::models::MetricSample;
use crate::providers::HistoricalRecordProvider;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Pulls per-metric history and normalizes it into ordered sample sequences
///
/// The provider is not required to return sorted rows; samples are sorted
/// ascending by timestamp here, once, so downstream components can assume
/// order. The sort is stable: rows sharing a timestamp keep their arrival
/// order.
pub struct RecordAggregator;

impl RecordAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Fetch and normalize history for each requested metric
    ///
    /// Metrics with no records are absent from the result; that is not an
    /// error. A provider failure aborts the whole fetch — no partial
    /// degraded result is returned.
    pub async fn fetch<P: HistoricalRecordProvider + ?Sized>(
        &self,
        provider: &P,
        subject_id: Uuid,
        metric_names: &[&str],
        since: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<MetricSample>>, AnalyticsError> {
        let mut result = HashMap::new();

        for metric_name in metric_names {
            let records = provider
                .get_metric_history(subject_id, metric_name, since)
                .await?;

            debug!(
                metric = %metric_name,
                records = records.len(),
                "aggregated metric history"
            );

            if records.is_empty() {
                continue;
            }

            let mut samples: Vec<MetricSample> = records
                .into_iter()
                .map(|record| MetricSample {
                    subject_id,
                    metric_name: (*metric_name).to_string(),
                    timestamp: record.timestamp,
                    value: record.value,
                })
                .collect();
            samples.sort_by_key(|s| s.timestamp);

            result.insert((*metric_name).to_string(), samples);
        }

        Ok(result)
    }
}

impl Default for RecordAggregator {
    fn default() -> Self {
        Self::new()
    }
}
