//! Native library configuration and logging setup
//!
//! Precedence for the log filter (lowest to highest):
//! 1. Compiled default: `warn`
//! 2. Environment variable: `RUSTYRANGE_LOG`
//! 3. `:log` key of the map passed as `load_info` by the Elixir module

use rustler::Term;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG: &str = "warn";
pub const LOG_ENV: &str = "RUSTYRANGE_LOG";

mod atoms {
    rustler::atoms! {
        log,
        ansi,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeConfig {
    /// `EnvFilter` directive string, e.g. `"rustyrange=debug"`
    pub log: String,
    /// Colour escapes in formatted log lines
    pub ansi: bool,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            log: DEFAULT_LOG.to_string(),
            ansi: false,
        }
    }
}

impl NativeConfig {
    /// Layer the optional sources over the defaults
    pub fn resolve(load_log: Option<String>, env_log: Option<String>, ansi: Option<bool>) -> Self {
        let defaults = Self::default();
        Self {
            log: load_log.or(env_log).unwrap_or(defaults.log),
            ansi: ansi.unwrap_or(defaults.ansi),
        }
    }

    /// Read the `load_info` term. Anything that is not a map, and any key
    /// that is absent or of the wrong type, falls through to the next layer.
    pub fn from_load_info(info: Term) -> Self {
        let (load_log, ansi) = if info.is_map() {
            let load_log = info
                .map_get(atoms::log())
                .ok()
                .and_then(|t| t.decode::<String>().ok());
            let ansi = info
                .map_get(atoms::ansi())
                .ok()
                .and_then(|t| t.decode::<bool>().ok());
            (load_log, ansi)
        } else {
            (None, None)
        };
        Self::resolve(load_log, std::env::var(LOG_ENV).ok(), ansi)
    }

    /// The filter for the formatted layer; an unparsable directive yields
    /// the default level instead of failing the load
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG))
    }
}

/// Install the global stderr subscriber. A subscriber installed earlier by
/// the host is left in place.
pub fn init_logging(config: &NativeConfig) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_ansi(config.ansi);

    let result = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(config.env_filter()))
        .try_init();

    match result {
        Ok(()) => debug!(filter = %config.log, "logging initialized"),
        Err(e) => debug!("tracing subscriber already set: {}", e),
    }
}
