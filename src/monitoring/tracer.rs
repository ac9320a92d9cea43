/*!
 * Structured Tracing
 * Subscriber setup and resolution spans using the tracing crate
 *
 * Features:
 * - Trace ID per resolution for request correlation
 * - JSON-formatted logs for structured parsing
 * - Slow-resolution warnings
 */

use crate::core::limits::SLOW_RESOLUTION_THRESHOLD;
use crate::core::types::HandlerMethod;
use crate::policy::Decision;
use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - GUARD_TRACE_JSON: Enable JSON output (default: false)
///
/// Calling this more than once keeps the first subscriber.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("GUARD_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        // JSON output for production/parsing
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok();
        if installed {
            info!("Structured tracing initialized with JSON output");
        }
    } else {
        // Human-readable output for development
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .is_ok();
        if installed {
            info!("Structured tracing initialized");
        }
    }
}

/// Generate a unique trace ID for request correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one authorization decision
pub struct ResolutionSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl ResolutionSpan {
    pub fn new(handler: &HandlerMethod) -> Self {
        let trace_id = generate_trace_id();
        let method = handler
            .method
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or("<unidentified>");

        let span = span!(
            Level::DEBUG,
            "resolve",
            trace_id = %trace_id,
            handler_type = %handler.handler_type,
            method = method,
            decision = tracing::field::Empty,
            error = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn record_decision(&self, decision: &Decision) {
        self.span.record("decision", decision.to_string().as_str());
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for ResolutionSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros() as u64);

        if duration > SLOW_RESOLUTION_THRESHOLD {
            warn!(
                trace_id = %self.trace_id,
                duration_us = duration.as_micros() as u64,
                slow = true,
                "slow resolution detected"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                duration_us = duration.as_micros() as u64,
                "resolution completed"
            );
        }
    }
}
