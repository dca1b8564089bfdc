use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Default filter; ticks go to stdout, so diagnostics stay quiet unless asked for
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the global subscriber, writing to stderr. `RUST_LOG` wins over `level`.
/// Calling it again is a no-op.
pub fn init_tracing(level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LOG_LEVEL)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false);

    // Fails only when a subscriber is already installed (tests, repeated init)
    let _ = Registry::default().with(env_filter).with(stderr_layer).try_init();
}
