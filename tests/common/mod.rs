use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: Once = Once::new();

/// Routes the crate's trace output to the test harness, filtered by
/// `RUST_LOG` (defaults to `nodeshapes=debug`).
pub fn init_logging() {
    LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nodeshapes=debug"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
