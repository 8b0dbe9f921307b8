//! Tracing subscriber setup for the command-line tool

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for the given verbosity
///
/// `RUST_LOG` overrides this when set.
pub const fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn,chromatile=info",
        1 => "info,chromatile=debug",
        _ => "debug,chromatile=trace",
    }
}

/// Install the global subscriber
///
/// Silently keeps an already installed subscriber, so tests and embedders
/// may call this more than once.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, quiet)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
