/*!
 * Structured Tracing
 * Subscriber setup and per-command spans using the tracing crate
 *
 * Output always goes to stderr so it never interleaves with the interactive
 * menu on stdout.
 */

use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable enabling JSON trace output
pub const ENV_TRACE_JSON: &str = "PAGEMEM_TRACE_JSON";

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "warn";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: warn)
/// - PAGEMEM_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one shell command
pub struct CommandSpan {
    span: tracing::Span,
    start: Instant,
}

impl CommandSpan {
    pub fn new(command: &str, sequence: u64) -> Self {
        let span = span!(
            Level::DEBUG,
            "command",
            command = command,
            sequence = sequence,
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
        );
        span.in_scope(|| debug!(command, sequence, "command started"));

        Self {
            span,
            start: Instant::now(),
        }
    }

    /// Run `f` with this span entered
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }

    /// Record the command outcome
    pub fn record_result(&self, success: bool) {
        self.span
            .record("result", if success { "success" } else { "error" });
    }
}

impl Drop for CommandSpan {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_micros() as u64;
        self.span.record("duration_us", elapsed);
    }
}
