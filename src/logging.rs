//! Logging setup for Flora
//!
//! Thin helpers around `tracing-subscriber`. Library code only emits `tracing`
//! events; applications decide whether and how to collect them.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the level passed to [`init_logging`].
pub const LOG_ENV_VAR: &str = "FLORA_LOG";

/// Log levels supported by Flora.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }

    /// Filter directive scoping this level to the `flora` target.
    pub fn directive(self) -> String {
        format!("flora={}", self.to_tracing_level())
    }
}

/// Initialize logging for Flora with a specific log level.
///
/// Call once at application start. `FLORA_LOG` takes precedence over `level`:
///
/// ```bash
/// FLORA_LOG=debug cargo run --example identify_plant -- leaf.jpg
/// ```
///
/// ```no_run
/// use flora::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Info);
/// tracing::info!("Application starting");
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("Flora logging initialized at level: {:?}", level);
}

/// Initialize logging with a custom filter string such as
/// `"flora=debug,flora::backend=trace"`.
pub fn init_logging_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| {
        eprintln!("Invalid log filter {filter:?}, falling back to flora=info");
        EnvFilter::new(LogLevel::Info.directive())
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("Flora logging initialized with custom filter: {}", filter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_targets_crate() {
        assert_eq!(LogLevel::Debug.directive(), "flora=DEBUG");
        assert_eq!(LogLevel::Error.directive(), "flora=ERROR");
    }
}
