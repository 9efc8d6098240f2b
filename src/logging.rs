// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Production-ready logging configuration with structured output

use crate::constants::service;
use anyhow::Result;
use std::env;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span information for tracing
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

#[derive(Debug, Clone)]
pub enum LogFormat {
    /// JSON format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: service::SERVICE_NAME.to_string(),
            environment: "development".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service::SERVICE_NAME.to_string()),
            environment,
        }
    }

    /// Initialize the global tracing subscriber
    pub fn init(&self) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let registry = tracing_subscriber::registry().with(env_filter);

        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).init();
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events);

                registry.with(pretty_layer).init();
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false)
                    .with_writer(io::stdout)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).init();
            }
        }

        info!(
            service.name = %self.service_name,
            service.version = %service::SERVICE_VERSION,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Vitalis analytics engine starting up"
        );

        Ok(())
    }
}

/// Initialize logging with default configuration
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

/// Initialize logging from environment
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Structured event helpers for the analytics engine
pub struct AppLogger;

impl AppLogger {
    /// Log the outcome of one analytics operation
    pub fn log_analysis(subject_id: &str, operation: &str, success: bool, duration_ms: u64) {
        info!(
            subject.id = %subject_id,
            analysis.operation = %operation,
            analysis.success = %success,
            analysis.duration_ms = %duration_ms,
            "Analysis completed"
        );
    }

    /// Log a record fetch from the data-store
    pub fn log_provider_fetch(subject_id: &str, resource: &str, records: usize) {
        info!(
            subject.id = %subject_id,
            fetch.resource = %resource,
            fetch.records = %records,
            "Provider fetch"
        );
    }

    /// Log an upstream provider failure
    pub fn log_provider_failure(subject_id: &str, resource: &str, error: &str) {
        warn!(
            subject.id = %subject_id,
            fetch.resource = %resource,
            fetch.error = %error,
            "Provider fetch failed"
        );
    }

    /// Log the application of a documented fallback policy
    pub fn log_policy_fallback(subject_id: &str, component: &str, policy: &str) {
        info!(
            subject.id = %subject_id,
            policy.component = %component,
            policy.applied = %policy,
            "Fallback policy applied"
        );
    }
}
