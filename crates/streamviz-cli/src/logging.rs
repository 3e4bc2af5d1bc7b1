//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout carries only rendered events.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Pick the log filter: explicit flag, then `RUST_LOG`, then `warn`
pub fn build_filter(explicit: Option<&str>) -> EnvFilter {
    match explicit {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("Invalid --log-level '{directives}': {e}; using '{DEFAULT_FILTER}'");
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install the stderr subscriber
pub fn init(explicit: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(explicit))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
