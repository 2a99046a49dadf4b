/*!
 * Command Tracing
 * Structured tracing for shell commands using the tracing crate
 *
 * Features:
 * - `log` records from the manager bridged into the subscriber
 * - JSON-formatted logs for structured parsing
 * - One span per command with its outcome recorded
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: warn)
///
/// Output goes to stderr; stdout belongs to the command output. Calling this
/// twice is harmless, the second subscriber is simply not installed.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
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
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json, "Structured tracing initialized");
    }
}

/// Span covering a single shell command
pub struct CommandSpan {
    span: tracing::Span,
    start: Instant,
    line: usize,
}

impl CommandSpan {
    pub fn new(command: &str, line: usize) -> Self {
        let span = span!(
            Level::DEBUG,
            "command",
            command = command,
            line = line,
            result = tracing::field::Empty,
            running = tracing::field::Empty,
            error = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            line,
        }
    }

    /// Record the process left running by the command
    pub fn record_running(&self, pid: &str) {
        self.span.record("running", pid);
        self.span.record("result", "success");
    }

    /// Record a rejected command
    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for CommandSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();

        if duration.as_millis() > 10 {
            warn!(
                line = self.line,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow command detected"
            );
        } else {
            self.span.record("duration_us", duration.as_micros() as u64);
            debug!(line = self.line, "command completed");
        }
    }
}

/// Helper to create a command span
#[inline]
pub fn span_command(command: &str, line: usize) -> CommandSpan {
    CommandSpan::new(command, line)
}
