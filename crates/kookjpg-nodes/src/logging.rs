//! Log output for the host process.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "kookjpg_core=info,kookjpg_nodes=info";

/// Install a formatting subscriber that honors `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes. Safe to call from every node load.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
