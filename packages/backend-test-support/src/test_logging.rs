//! Logging initialization shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize tracing for a test binary. Safe to call from every test:
/// only the first call does anything, and an already-installed global
/// subscriber is tolerated rather than panicked on.
///
/// Verbosity comes from `TEST_LOG` if set, then `RUST_LOG`, defaulting to
/// `warn` so passing runs stay quiet.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
