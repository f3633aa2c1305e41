/*!
 * Syscall Tracing
 * Subscriber setup and the span wrapped around every dispatched syscall
 */

use crate::core::types::{SyscallReturn, TaskId};
use std::time::{Duration, Instant};
use tracing::{debug, info, span, warn, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable selecting JSON output
pub const ENV_TRACE_JSON: &str = "KERNEL_TRACE_JSON";

/// Syscalls slower than this are reported at warn
const SLOW_SYSCALL: Duration = Duration::from_millis(10);

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - KERNEL_TRACE_JSON: Enable JSON output (default: false)
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = use_json, "Syscall tracing initialized");
    }
    installed
}

/// Span covering one syscall from dispatch to outcome
pub struct SyscallSpan {
    span: Span,
    start: Instant,
    name: &'static str,
}

impl SyscallSpan {
    pub fn new(name: &'static str, nr: u64, task: Option<TaskId>) -> Self {
        let span = span!(
            Level::DEBUG,
            "syscall",
            syscall = name,
            nr,
            task = ?task,
            ret = tracing::field::Empty,
            yielded = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
            name,
        }
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    /// Record the value the guest will eventually observe
    pub fn record_return(&self, value: SyscallReturn, yielded: bool) {
        self.span.record("ret", value);
        self.span.record("yielded", yielded);
    }

    pub fn record_error(&self, error: &dyn std::error::Error) {
        let _entered = self.span.enter();
        warn!(syscall = self.name, error = %error, "Unsupported syscall path");
    }
}

impl Drop for SyscallSpan {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", elapsed.as_micros() as u64);
        if elapsed > SLOW_SYSCALL {
            warn!(syscall = self.name, duration_ms = elapsed.as_millis() as u64, "slow syscall");
        } else {
            debug!(syscall = self.name, duration_us = elapsed.as_micros() as u64, "syscall completed");
        }
    }
}
