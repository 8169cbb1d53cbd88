//! Log subscriber setup
//!
//! Logs always go to stderr so `run --json` output stays parseable.

use crate::config::Verbosity;
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is unset
#[must_use]
pub const fn filter_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "warn,ti83_core=debug,ti83_cli=debug",
        Verbosity::Debug => "info,ti83_core=trace,ti83_cli=trace",
    }
}

/// Builds the filter, letting `RUST_LOG` win over the flags
#[must_use]
pub fn build_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)))
}

/// Installs the global subscriber
///
/// A second call is a no-op.
pub fn init(verbosity: Verbosity, ansi: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .try_init();
}
