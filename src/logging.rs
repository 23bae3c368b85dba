//! # Structured Logging Module
//!
//! Environment-aware console logging built on `tracing`, plus the span helper
//! every action uses to label the item it is working on.
//!
//! Hosts that already install a global subscriber keep theirs; initialization
//! here is a no-op in that case.

use chrono::Utc;
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing::Span;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));
        let json = use_json_format();

        let layer = if json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(std::io::stdout().is_terminal())
                .with_filter(filter)
                .boxed()
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized, keeping the existing one"
            );
            return;
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            json = json,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var("DEFERRED_ACTIONS_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

fn use_json_format() -> bool {
    std::env::var("DEFERRED_ACTIONS_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Human-readable label for an item operation, e.g. `activate-/content/dam/a.jpg`
pub fn item_label(operation: &str, path: &str) -> String {
    format!("{operation}-{path}")
}

/// Span tagging one action invocation with its label and a fresh correlation id.
///
/// Spans only carry diagnostics; nothing reads them back.
pub fn item_span(operation: &str, path: &str) -> Span {
    tracing::info_span!(
        "deferred_action",
        correlation_id = %Uuid::new_v4(),
        label = %item_label(operation, path),
        operation = operation,
        path = path,
    )
}

/// Span for session work that is not bound to an item path
pub fn work_span(operation: &str, work: &str) -> Span {
    tracing::info_span!(
        "deferred_action",
        correlation_id = %Uuid::new_v4(),
        label = operation,
        operation = operation,
        work = work,
    )
}

/// Log structured data for item operations
pub fn log_item_operation(operation: &str, path: &str, status: &str, details: Option<&str>) {
    tracing::info!(
        operation = %operation,
        path = %path,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "ITEM_OPERATION"
    );
}
