//! Process-wide logging for the MerchantDesk binaries.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber: JSON-formatted events with timestamps,
/// filtered through `RUST_LOG` (falling back to `info`).
///
/// Idempotent — repeated calls leave the first subscriber in place.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .json()
        .try_init();
}
