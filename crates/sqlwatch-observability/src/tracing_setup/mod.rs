//! Tracing setup: subscriber installation, span macros, and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use sqlwatch_core::constants::LOG_ENV_VAR;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Fallback filter when `SQLWATCH_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "sqlwatch=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the human-readable subscriber.
///
/// Reads `SQLWATCH_LOG` for per-crate levels, e.g.
/// `SQLWATCH_LOG=sqlwatch_masking=debug,sqlwatch_alerting=warn`.
/// Idempotent; only the first call in a process installs anything.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter())
            .try_init();
    });
}

/// Install a JSON subscriber. Shares the once-guard with [`init_tracing`].
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter())
            .try_init();
    });
}

/// Install with an explicit filter string (tests, embedding hosts).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init();
    });
}
