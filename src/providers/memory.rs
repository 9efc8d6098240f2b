// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory provider for tests and local development

use super::{
    BehaviorEventProvider, EngagementProvider, HistoricalRecordProvider, ProviderError,
};
use crate::models::{
    BehaviorDomain, BehaviorEvent, EngagementEvent, ExerciseSession, MetricRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// A provider backed by plain maps; seed it, then hand it to the engine
#[derive(Debug, Default)]
pub struct MemoryProvider {
    metrics: HashMap<(Uuid, String), Vec<MetricRecord>>,
    engagement: HashMap<Uuid, Vec<EngagementEvent>>,
    logins: HashMap<Uuid, DateTime<Utc>>,
    sessions: HashMap<Uuid, Vec<ExerciseSession>>,
    events: HashMap<(Uuid, BehaviorDomain), Vec<BehaviorEvent>>,
    /// When set, every fetch fails with this status
    fail_with_status: Option<u16>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append metric observations for a subject
    pub fn add_metric_records(
        &mut self,
        subject_id: Uuid,
        metric_name: &str,
        records: Vec<MetricRecord>,
    ) {
        self.metrics
            .entry((subject_id, metric_name.to_string()))
            .or_default()
            .extend(records);
    }

    /// Append engagement events for a subject
    pub fn add_engagement_events(&mut self, subject_id: Uuid, events: Vec<EngagementEvent>) {
        self.engagement.entry(subject_id).or_default().extend(events);
    }

    /// Record the subject's last login
    pub fn set_last_login(&mut self, subject_id: Uuid, at: DateTime<Utc>) {
        self.logins.insert(subject_id, at);
    }

    /// Append completed workout sessions for a subject
    pub fn add_exercise_sessions(&mut self, subject_id: Uuid, sessions: Vec<ExerciseSession>) {
        self.sessions.entry(subject_id).or_default().extend(sessions);
    }

    /// Append behavior events for one domain
    pub fn add_behavior_events(
        &mut self,
        subject_id: Uuid,
        domain: BehaviorDomain,
        events: Vec<BehaviorEvent>,
    ) {
        self.events
            .entry((subject_id, domain))
            .or_default()
            .extend(events);
    }

    /// Make every subsequent fetch fail, for upstream-failure tests
    pub fn fail_with_status(&mut self, status: u16) {
        self.fail_with_status = Some(status);
    }

    fn check_failure(&self, endpoint: &str) -> Result<(), ProviderError> {
        if let Some(status) = self.fail_with_status {
            return Err(ProviderError::Status {
                status,
                endpoint: endpoint.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl HistoricalRecordProvider for MemoryProvider {
    async fn get_metric_history(
        &self,
        subject_id: Uuid,
        metric_name: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<MetricRecord>, ProviderError> {
        self.check_failure("metrics")?;
        Ok(self
            .metrics
            .get(&(subject_id, metric_name.to_string()))
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.timestamp >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl EngagementProvider for MemoryProvider {
    async fn get_recent_activity(
        &self,
        subject_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<EngagementEvent>, ProviderError> {
        self.check_failure("activity")?;
        Ok(self
            .engagement
            .get(&subject_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.occurred_at >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_last_login(
        &self,
        subject_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, ProviderError> {
        self.check_failure("last-login")?;
        Ok(self.logins.get(&subject_id).copied())
    }

    async fn get_exercise_sessions(
        &self,
        subject_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<ExerciseSession>, ProviderError> {
        self.check_failure("sessions")?;
        Ok(self
            .sessions
            .get(&subject_id)
            .map(|sessions| {
                sessions
                    .iter()
                    .filter(|s| s.completed_at >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl BehaviorEventProvider for MemoryProvider {
    async fn get_events(
        &self,
        subject_id: Uuid,
        domain: BehaviorDomain,
        since: DateTime<Utc>,
    ) -> Result<Vec<BehaviorEvent>, ProviderError> {
        self.check_failure("events")?;
        Ok(self
            .events
            .get(&(subject_id, domain))
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.occurred_at >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
