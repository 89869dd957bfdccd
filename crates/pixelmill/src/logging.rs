//! Tracing subscriber setup for the CLI.
//!
//! All log output lands on stderr so that stdout stays clean for command
//! results such as spec strings and run reports. When `RUST_LOG` is set it
//! wins over any configured level.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber at the given level.
///
/// `json` switches the output to line-delimited JSON records for log
/// collectors; the default is a compact format for terminals.
pub fn init(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Resolve the level and format from the config file plus CLI flags, then
/// install the subscriber. `--verbose` forces debug regardless of the
/// configured level; unknown level names fall back to info.
pub fn init_from_config(config: &pixelmill_core::Config, verbose: bool, json_logs: bool) {
    let level = if verbose {
        "debug"
    } else {
        match config.logging.level.as_str() {
            lvl @ ("error" | "warn" | "info" | "debug" | "trace") => lvl,
            _ => "info",
        }
    };
    init(level, json_logs || config.logging.format == "json");
}
