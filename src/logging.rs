//! Structured logging setup.
//!
//! The library only emits `tracing` events and spans. Binaries and test
//! harnesses that want to see them call [`init_logging`] once at start-up;
//! `RUST_LOG` overrides the configured level when set.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt::format::FmtSpan};

/// Logging configuration options.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level to output when `RUST_LOG` is unset.
    pub level: Level,
    /// Show the module path of each event.
    pub show_target: bool,
    /// Emit one JSON object per line instead of human-readable text.
    pub json_format: bool,
    /// Emit an event when each instrumented span closes.
    pub enable_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            show_target: false,
            json_format: false,
            enable_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Verbose configuration used by test harnesses.
    #[must_use]
    pub const fn for_tests() -> Self {
        Self {
            level: Level::DEBUG,
            show_target: true,
            json_format: false,
            enable_spans: true,
        }
    }
}

/// Errors raised while installing the global subscriber.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs the global `tracing` subscriber described by `config`.
///
/// # Errors
///
/// Returns [`LoggingError::Install`] when a global subscriber has already
/// been set, for example by an earlier call.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();
    let span_events = if config.enable_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.show_target)
        .with_span_events(span_events);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| LoggingError::Install(err.to_string()))
}
