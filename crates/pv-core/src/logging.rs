//! Structured logging setup.
//!
//! stdout is reserved for the rendered table; all log output goes to
//! stderr. The level comes from the `-v`/`-q` flags, and the
//! `PROCVIEW_LOG` environment variable overrides both with a full
//! `EnvFilter` directive when set.

use tracing_subscriber::EnvFilter;

/// Logging configuration derived from the CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    pub verbose: u8,
    pub quiet: bool,
}

impl LogConfig {
    fn base_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Initialize the global subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_env("PROCVIEW_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.base_level()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
