//! Tracing subscriber setup.

use crate::config::LogConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Error returned when a global subscriber is already installed.
pub use tracing_subscriber::util::TryInitError;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over [`LogConfig::filter`].
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber was already set.
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    }
}
