//! Logging setup for the server binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "keyed_orders=info,tower_http=info";

/// Initializes the global `tracing` subscriber.
///
/// Verbosity follows `RUST_LOG` (for example `RUST_LOG=keyed_orders=debug` to
/// see every store construction), falling back to [`DEFAULT_FILTER`]. Calling
/// this twice is harmless; the second call leaves the first subscriber in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
