//! Logging setup for the command-line tool.
//!
//! Level priority: `RUST_LOG` > `--debug` > `log_level` from the config
//! file > `warn`. Everything goes to stderr so reports on stdout stay
//! machine-readable.

use tracing_subscriber::EnvFilter;

/// Level used when nothing else asks for one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Picks the filter directive according to the priority order.
fn directive(rust_log_set: bool, debug_flag: bool, config_level: Option<&str>) -> Option<&str> {
    if rust_log_set {
        None
    } else if debug_flag {
        Some("debug")
    } else {
        Some(config_level.unwrap_or(DEFAULT_LOG_LEVEL))
    }
}

/// Installs the global tracing subscriber.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let rust_log_set = std::env::var("RUST_LOG").is_ok();
    let filter = match directive(rust_log_set, debug_flag, config_level) {
        None => EnvFilter::from_default_env(),
        Some(level) => EnvFilter::new(level),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
}
