//! Tracing setup for tests
//!
//! Installs a fmt subscriber honouring `RUST_LOG` so resolver debug events
//! show up when a test run needs them.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Initialises the tracing subscriber once per test binary
///
/// Safe to call from every test; later calls are no-ops.
pub fn init_test_tracing() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
