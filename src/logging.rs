//! Diagnostic logging to stderr through `env_logger`.
//!
//! Stdout carries results only, so every log line goes to stderr. The level
//! comes from `-v` repetitions; `PKACHU_LOG` (or `RUST_LOG` when unset)
//! refines it with the usual `env_logger` filter syntax.

use env_logger::{Builder, Target};
use log::LevelFilter;

pub const LOG_ENV: &str = "PKACHU_LOG";

/// Map `-v` repetitions to a level filter.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

/// Install the global logger. Calling it twice is harmless.
pub fn initialize(verbosity: u8) {
	let mut builder = Builder::new();
	builder
		.filter_level(level_for_verbosity(verbosity))
		.target(Target::Stderr)
		.format_timestamp(None)
		.format_target(verbosity > 1);

	match std::env::var(LOG_ENV).or_else(|_| std::env::var("RUST_LOG")) {
		Ok(filters) if !filters.trim().is_empty() => {
			builder.parse_filters(&filters);
		}
		_ => {}
	}

	if builder.try_init().is_ok() {
		log::debug!("logging initialised at {}", level_for_verbosity(verbosity));
	}
}
