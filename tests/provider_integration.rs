// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Integration tests for the data-store provider adapter
//!
//! These tests verify request shapes, payload decoding and error handling
//! using mocked HTTP responses.

use anyhow::Result;
use chrono::{Duration, Utc};
use mockito::{Matcher, Server};
use serde_json::json;
use uuid::Uuid;
use vitalis_analytics::analytics::RecordAggregator;
use vitalis_analytics::config::DatastoreConfig;
use vitalis_analytics::errors::AnalyticsError;
use vitalis_analytics::models::BehaviorDomain;
use vitalis_analytics::providers::datastore::DatastoreProvider;
use vitalis_analytics::providers::{
    BehaviorEventProvider, EngagementProvider, HistoricalRecordProvider, ProviderError,
};

fn provider_for(server: &Server) -> DatastoreProvider {
    DatastoreProvider::new(&DatastoreConfig {
        base_url: server.url(),
        api_key: Some("test_api_key".to_string()),
        timeout_secs: 5,
    })
    .expect("mock server URL is valid")
}

/// Helper to create a mock metric history response, deliberately unsorted
fn mock_weight_history() -> serde_json::Value {
    json!([
        { "timestamp": "2025-06-20T08:00:00Z", "value": 69.0 },
        { "timestamp": "2025-06-01T08:00:00Z", "value": 70.5 },
        { "timestamp": "2025-06-10T08:00:00Z", "value": 70.0 }
    ])
}

#[tokio::test]
async fn test_metric_history_fetch_and_decode() -> Result<()> {
    let mut server = Server::new_async().await;
    let subject = Uuid::new_v4();

    let _mock = server
        .mock("GET", format!("/subjects/{}/metrics/weight", subject).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mock_weight_history().to_string())
        .create_async()
        .await;

    let provider = provider_for(&server);
    let records = provider
        .get_metric_history(subject, "weight", Utc::now() - Duration::days(90))
        .await?;

    assert_eq!(records.len(), 3);
    // Adapter returns the store's order untouched; sorting is the
    // aggregator's job
    assert_eq!(records[0].value, 69.0);

    Ok(())
}

#[tokio::test]
async fn test_aggregator_sorts_unsorted_store_payload() -> Result<()> {
    let mut server = Server::new_async().await;
    let subject = Uuid::new_v4();

    let _mock = server
        .mock("GET", format!("/subjects/{}/metrics/weight", subject).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mock_weight_history().to_string())
        .create_async()
        .await;

    let provider = provider_for(&server);
    let aggregator = RecordAggregator::new();
    let histories = aggregator
        .fetch(
            &provider,
            subject,
            &["weight"],
            Utc::now() - Duration::days(3650),
        )
        .await?;

    let samples = &histories["weight"];
    assert_eq!(samples.len(), 3);
    assert!(samples.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(samples[0].value, 70.5);
    assert_eq!(samples[2].value, 69.0);

    Ok(())
}

#[tokio::test]
async fn test_server_error_surfaces_as_status() {
    let mut server = Server::new_async().await;
    let subject = Uuid::new_v4();

    let _mock = server
        .mock("GET", format!("/subjects/{}/metrics/weight", subject).as_str())
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider
        .get_metric_history(subject, "weight", Utc::now() - Duration::days(90))
        .await;

    assert!(matches!(
        result,
        Err(ProviderError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_server_error_becomes_upstream_through_aggregator() {
    let mut server = Server::new_async().await;
    let subject = Uuid::new_v4();

    let _mock = server
        .mock("GET", format!("/subjects/{}/metrics/weight", subject).as_str())
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = RecordAggregator::new()
        .fetch(
            &provider,
            subject,
            &["weight"],
            Utc::now() - Duration::days(90),
        )
        .await;

    assert!(matches!(result, Err(AnalyticsError::Upstream(_))));
}

#[tokio::test]
async fn test_malformed_payload_is_decode_error() {
    let mut server = Server::new_async().await;
    let subject = Uuid::new_v4();

    let _mock = server
        .mock("GET", format!("/subjects/{}/metrics/weight", subject).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected": "shape"}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let result = provider
        .get_metric_history(subject, "weight", Utc::now() - Duration::days(90))
        .await;

    assert!(matches!(result, Err(ProviderError::Decode(_))));
}

#[tokio::test]
async fn test_last_login_null_decodes_to_none() -> Result<()> {
    let mut server = Server::new_async().await;
    let subject = Uuid::new_v4();

    let _mock = server
        .mock("GET", format!("/subjects/{}/last-login", subject).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "last_login": null }).to_string())
        .create_async()
        .await;

    let provider = provider_for(&server);
    let last_login = provider.get_last_login(subject).await?;
    assert!(last_login.is_none());

    Ok(())
}

#[tokio::test]
async fn test_behavior_events_decode_optional_quantity() -> Result<()> {
    let mut server = Server::new_async().await;
    let subject = Uuid::new_v4();

    let _mock = server
        .mock(
            "GET",
            format!("/subjects/{}/events/purchases", subject).as_str(),
        )
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "occurred_at": "2025-06-01T10:00:00Z", "quantity": 49.99 },
                { "occurred_at": "2025-06-08T10:00:00Z", "quantity": null }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let provider = provider_for(&server);
    let events = provider
        .get_events(
            subject,
            BehaviorDomain::Purchases,
            Utc::now() - Duration::days(3650),
        )
        .await?;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].quantity, Some(49.99));
    assert!(events[1].quantity.is_none());

    Ok(())
}

#[tokio::test]
async fn test_exercise_sessions_decode() -> Result<()> {
    let mut server = Server::new_async().await;
    let subject = Uuid::new_v4();

    let _mock = server
        .mock("GET", format!("/subjects/{}/sessions", subject).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "completed_at": "2025-06-05T07:30:00Z", "duration_minutes": 42.5 }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let provider = provider_for(&server);
    let sessions = provider
        .get_exercise_sessions(subject, Utc::now() - Duration::days(3650))
        .await?;

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].duration_minutes, 42.5);

    Ok(())
}
