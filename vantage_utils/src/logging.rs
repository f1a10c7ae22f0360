//! Logging bootstrap shared by engine binaries, tools and tests.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` when set, otherwise `info`. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
