//! Logging initialization

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::settings::ObservabilityConfig;

/// Initialize the global tracing subscriber from observability settings.
///
/// `RUST_LOG` wins over the configured level when set. Safe to call more
/// than once; later calls are no-ops.
pub fn init_logging(config: &ObservabilityConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
