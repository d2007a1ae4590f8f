use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging with human-readable output format.
///
/// Uses the `RUST_LOG` environment variable if set, otherwise falls back
/// to `default_level` (e.g. "info", "venture_core=debug,warn").
///
/// Safe to call multiple times (e.g. in tests) -- subsequent calls are no-ops.
pub fn init_logging(service_name: &str, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .try_init()
        .ok();

    tracing::debug!(service = service_name, "logging initialised (human-readable)");
}

/// Initialize logging with JSON output format, for piping the headless
/// mode's diagnostics into log tooling.
///
/// Safe to call multiple times -- subsequent calls are no-ops.
pub fn init_logging_json(service_name: &str, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .try_init()
        .ok();

    tracing::debug!(service = service_name, "logging initialised (json)");
}
