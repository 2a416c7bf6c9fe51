//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Directive used when debug logging is off.
const DEFAULT_LEVEL: &str = "info";

/// Install the global fmt subscriber.
///
/// Without `debug` the level is fixed at `info` and `RUST_LOG` is ignored.
/// With `debug` the default becomes `debug` and `RUST_LOG` may override it.
/// Calling this twice is harmless; the second call does nothing.
pub fn init(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_target(false)
        .try_init();
}

fn filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new(DEFAULT_LEVEL)
    }
}
