// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Vitalis Analytics
//!
//! Predictive analytics engine for the Vitalis fitness and wellness platform.
//! Given a subject's historical records (health measurements, workout sessions,
//! purchase and engagement events), the engine forecasts future health metrics,
//! scores churn risk, infers seasonal behavior and ranks improvement
//! interventions.
//!
//! ## Features
//!
//! - **Metric forecasting**: ordinary least squares trend fit with an R²
//!   goodness-of-fit confidence figure
//! - **Activity scoring**: bounded 0-10 activity score from workout frequency
//!   and duration, with short-term trend classification
//! - **Risk scoring**: composite health risk and churn risk tiers built from
//!   fixed, auditable rule tables
//! - **Behavior cadence**: inter-event interval statistics and next expected
//!   event projection for purchases, exercise and nutrition logging
//! - **Seasonal inference**: calendar-season bucketing with a deterministic
//!   backfill policy for missing seasons
//! - **Interventions**: priority-ordered improvement actions derived from a
//!   per-subject pattern snapshot
//!
//! ## Architecture
//!
//! The crate is a library invoked in-process per request. Every computation is
//! stateless and request-scoped: the only I/O is the initial record fetch
//! through the provider traits in [`providers`]; once samples are in hand all
//! scoring is pure, synchronous and single-threaded.
//!
//! - **Providers**: data-access boundary (`HistoricalRecordProvider`,
//!   `EngagementProvider`, `BehaviorEventProvider`) plus the hosted
//!   data-store REST adapter and an in-memory fixture provider
//! - **Models**: record and result types shared across components
//! - **Analytics**: the eight scoring components and the request facade
//! - **Config**: datastore connection settings and the forecast horizon
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vitalis_analytics::analytics::PredictiveAnalyticsEngine;
//! use vitalis_analytics::config::AnalyticsConfig;
//! use vitalis_analytics::providers::datastore::DatastoreProvider;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AnalyticsConfig::load(None)?;
//!     let provider = DatastoreProvider::new(&config.datastore)?;
//!     let engine = PredictiveAnalyticsEngine::new(provider, config);
//!
//!     let subject = Uuid::new_v4();
//!     let response = engine.forecast_metric(subject, "weight", 30).await;
//!     if response.success {
//!         println!("forecast: {:?}", response.data);
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Data-access boundary traits and provider implementations
pub mod providers;

/// Common record and result models for analytics data
pub mod models;

/// Configuration management for the analytics engine
pub mod config;

/// Application constants and inherited policy values
pub mod constants;

/// Error taxonomy for analytics computations
pub mod errors;

/// Predictive analytics components and the request facade
pub mod analytics;

/// Production logging and structured output
pub mod logging;
