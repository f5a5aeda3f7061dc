//! Diagnostic logging for themefix.
//!
//! Diagnostics go to stderr so stdout stays reserved for the run report.
//! `RUST_LOG` takes precedence over the verbosity flag when set.

use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

/// Filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "themefix=warn",
		1 => "themefix=info",
		2 => "themefix=debug",
		_ => "themefix=trace",
	}
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbosity: u8) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

	let subscriber = registry().with(
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_ansi(false)
			.with_target(false)
			.without_time(),
	)
	.with(filter);

	if tracing::subscriber::set_global_default(subscriber).is_err() {
		tracing::debug!("logging already initialized");
	}
}
