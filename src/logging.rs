//! Logging setup for dsnkit.
//!
//! dsnkit emits `tracing` events and never installs a subscriber on its own.
//! Applications that have no subscriber of their own can call [`init`],
//! which honors these environment variables:
//!
//! - `DSNKIT_DEBUG=true|1|yes` - Enable debug logging
//! - `DSNKIT_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `DSNKIT_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! Output requires the `tracing-subscriber` feature.
//!
//! ```rust,no_run
//! dsnkit::logging::init();
//! ```
//!
//! Events carry structured fields and never include passwords:
//!
//! ```rust,ignore
//! debug!(scheme = %url.scheme(), host = %host, port = ?port, "DSN parsed");
//! trace!(key, kind = slot.kind(), "binding field");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "DSNKIT_DEBUG";
const LEVEL_VAR: &str = "DSNKIT_LOG_LEVEL";
const FORMAT_VAR: &str = "DSNKIT_LOG_FORMAT";

/// Check if debug logging is enabled via `DSNKIT_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

/// Get the configured log level.
///
/// Defaults to "debug" if `DSNKIT_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    env::var(LEVEL_VAR)
        .ok()
        .and_then(|level| parse_level(&level))
        .unwrap_or(fallback)
}

/// Get the configured log format. Defaults to "json".
pub fn get_log_format() -> &'static str {
    env::var(FORMAT_VAR)
        .map(|f| parse_format(&f))
        .unwrap_or("json")
}

/// Install a `tracing` subscriber for dsnkit events.
///
/// Does nothing unless `DSNKIT_DEBUG` or `DSNKIT_LOG_LEVEL` is set.
/// Subsequent calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!("dsnkit={}", level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));
            let registry = tracing_subscriber::registry().with(filter);

            // Another subscriber may already be installed; keep it.
            let installed = match get_log_format() {
                "json" => registry.with(fmt::layer().json()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().pretty()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level, format = get_log_format(), "dsnkit logging initialized");
            }
        }
    });
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn parse_level(value: &str) -> Option<&'static str> {
    match value.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

fn parse_format(value: &str) -> &'static str {
    match value.to_lowercase().as_str() {
        "pretty" => "pretty",
        "compact" => "compact",
        _ => "json",
    }
}
