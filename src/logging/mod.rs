//! Subscriber setup for the `perpscan` binary.
//!
//! The library only emits `tracing` events; choosing where they go is left to
//! whoever embeds it. The binary calls [`init_logging`] once at start-up:
//! JSON lines in production, ANSI human-readable output everywhere else.

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Whether `environment` selects structured JSON output
pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    if is_production(&get_environment()) {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false)
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    }
}
