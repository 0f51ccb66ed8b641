//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global fmt subscriber with the given filter directives.
///
/// An unparsable filter falls back to `info`. Returns `false` when a
/// subscriber was already installed, which happens when tests share a
/// process.
pub fn init_tracing(filter: &str) -> bool {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{}': {}, falling back to info", filter, e);
        EnvFilter::new("info")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
