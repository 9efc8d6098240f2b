// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error taxonomy for analytics computations
//!
//! One tagged error type covers the whole engine. Components return
//! `Result<T, AnalyticsError>` and the facade converts into the boundary
//! envelope; no exception-style error crosses the crate boundary.

use crate::providers::ProviderError;
use thiserror::Error;

/// Errors produced by analytics components
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Fewer samples or events than the component's documented minimum.
    /// Recovered locally: surfaced as a failure envelope, never propagated
    /// as a panic.
    #[error("insufficient data: {needed} {unit} required, {got} available")]
    InsufficientData {
        /// Minimum the component requires
        needed: usize,
        /// What the request actually held
        got: usize,
        /// What is being counted ("samples", "events", "sessions")
        unit: &'static str,
    },

    /// The record provider failed. Not retried here; retry policy belongs to
    /// the provider collaborator.
    #[error("upstream data source failed: {0}")]
    Upstream(#[from] ProviderError),

    /// An unexpected arithmetic failure. Guarded edge cases (zero-variance
    /// series, empty denominators) are special-cased in-line and never reach
    /// this variant.
    #[error("computation failed: {0}")]
    Computation(String),
}

impl AnalyticsError {
    /// Shorthand for the insufficient-data case
    pub fn insufficient(needed: usize, got: usize, unit: &'static str) -> Self {
        Self::InsufficientData { needed, got, unit }
    }

    /// Human-readable message for the failure envelope
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientData { .. } => crate::constants::messages::INSUFFICIENT_DATA.into(),
            Self::Upstream(_) => crate::constants::messages::UPSTREAM_FAILURE.into(),
            Self::Computation(_) => crate::constants::messages::COMPUTATION_FAILURE.into(),
        }
    }
}
