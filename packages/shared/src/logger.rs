//! Logging setup shared by the Kairan binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Without `RUST_LOG`, events from `crate_name` (the library crate of the
/// binary) and from `binary_name` itself are emitted at `default_log_level`.
/// `RUST_LOG` overrides the whole filter.
///
/// # Examples
///
/// ```no_run
/// use kairan_shared::logger::setup_logger;
///
/// setup_logger("kairan_server", "kairan_server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(crate_name: &str, binary_name: &str, level: &str) -> String {
    let crate_target = crate_name.replace('-', "_");
    let binary_target = binary_name.replace('-', "_");
    if crate_target == binary_target {
        format!("{crate_target}={level},tower_http={level}")
    } else {
        format!("{crate_target}={level},{binary_target}={level},tower_http={level}")
    }
}
