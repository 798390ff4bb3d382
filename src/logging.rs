//! Logging setup.
//!
//! Events go to stderr through `tracing-subscriber` so stdout carries only
//! command output. `CCSETTINGS_LOG` takes an `EnvFilter` directive and
//! overrides the verbosity flag.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "CCSETTINGS_LOG";

/// Map `-v` occurrences to a default filter level.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	}
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
	EnvFilter::try_from_env(LOG_ENV_VAR)
		.unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(verbosity: u8) {
	let _ = tracing_subscriber::registry()
		.with(build_env_filter(verbosity))
		.with(
			fmt::layer()
				.with_target(false)
				.without_time()
				.with_writer(std::io::stderr),
		)
		.try_init();
}
