//! Telemetry & Observability
//!
//! Structured logging for termfolio.
//! Features:
//! - stderr logging for headless commands, gated on RUST_LOG
//! - file logging for the TUI, which owns the terminal
//! - log-injection escaping and secret redaction
//! - driver and submission state transition records

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::{Once, OnceLock};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Sanitize a string for safe log output by escaping control characters.
/// Prevents log injection where attackers embed newlines to forge log entries.
pub fn sanitize_for_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x1b' => out.push_str("\\e"),
            '\x00' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

/// Compiled regex patterns for secret redaction, with their replacements.
static SECRET_PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn secret_patterns() -> &'static [(Regex, &'static str)] {
    SECRET_PATTERNS.get_or_init(|| {
        vec![
            // Authorization code carried as a query parameter
            (
                Regex::new(r"(?i)([?&]code=)[^&#\s]*").expect("invalid code param regex"),
                "${1}[REDACTED]",
            ),
            // Bearer tokens in Authorization headers
            (
                Regex::new(r"(?i)Bearer\s+[A-Za-z0-9_\-\.]{8,}").expect("invalid bearer regex"),
                "[REDACTED]",
            ),
            // API keys: sk-..., key-..., token-...
            (
                Regex::new(r"(?i)(sk-|key-|token-)[A-Za-z0-9_\-]{8,}")
                    .expect("invalid secret regex"),
                "[REDACTED]",
            ),
        ]
    })
}

/// Redact sensitive data from a string before logging.
///
/// Masks the `code` query parameter, Bearer tokens, and prefixed API keys.
pub fn redact_secrets(input: &str) -> String {
    let mut result = input.to_string();
    for (pattern, replacement) in secret_patterns() {
        result = pattern.replace_all(&result, *replacement).into_owned();
    }
    result
}

/// Initialize global tracing subscriber on stderr.
/// Only enables tracing if RUST_LOG is explicitly set, keeping CLI output clean.
pub fn init_tracing() {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        init_tracing_with_filter(&filter);
    }
}

/// Initialize with custom filter string
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr);

        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

/// Route logs to a file so they never draw over the TUI.
///
/// `RUST_LOG` wins over `default_filter` when set. The returned guard must
/// live until shutdown; dropping it flushes pending lines.
pub fn init_tracing_to_file(path: &Path, default_filter: &str) -> Result<Option<WorkerGuard>> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let mut guard = None;
    INIT.call_once(|| {
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, worker) = tracing_appender::non_blocking(appender);

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer);

        let filter_layer = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::try_new(default_filter).unwrap_or_else(|_| EnvFilter::new("info")));

        if tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init()
            .is_ok()
        {
            guard = Some(worker);
        }
    });
    Ok(guard)
}

/// Record a state transition of a driver or the submission coordinator
pub fn record_state_transition(component: &str, from: &str, to: &str) {
    let safe_from = sanitize_for_log(from);
    let safe_to = sanitize_for_log(to);
    debug!(
        component,
        from = safe_from.as_str(),
        to = safe_to.as_str(),
        "State transition"
    );
}

/// Initialize tracing for tests with a simple subscriber
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
