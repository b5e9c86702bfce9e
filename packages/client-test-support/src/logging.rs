//! Test logging shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

/// Used when neither `TEST_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_DIRECTIVES: &str = "warn";
// HTTP internals stay quiet even when the client is turned up.
const QUIET_DEPENDENCIES: [&str; 2] = ["hyper=warn", "reqwest=warn"];

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Filter from `TEST_LOG`, then `RUST_LOG`, then [`DEFAULT_DIRECTIVES`].
pub fn filter() -> EnvFilter {
    let directives = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_DIRECTIVES.to_string());

    QUIET_DEPENDENCIES
        .iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(EnvFilter::new(directives), EnvFilter::add_directive)
}

/// Install the test subscriber once per process. Safe to call from any test.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let _ = fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init();
    });
}
