//! Logging setup using tracing.
//!
//! The library crates only emit `tracing` events; binaries and test
//! harnesses call [`init`] or [`try_init`] once to install a subscriber.

use serde::Deserialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parse a log level from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether to print logs to stderr.
    pub print: bool,
    /// Log level, used when `RUST_LOG` is not set.
    pub level: LogLevel,
    /// Whether to include file/line info in logs.
    pub include_location: bool,
    /// Route output through the test writer so `cargo test` captures it.
    pub test_writer: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            print: false,
            level: LogLevel::Info,
            include_location: false,
            test_writer: false,
        }
    }
}

impl LogConfig {
    /// Configuration suited to unit and integration tests.
    pub fn for_tests() -> Self {
        Self {
            print: true,
            level: LogLevel::Debug,
            include_location: true,
            test_writer: true,
        }
    }
}

fn filter_for(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.as_str()))
}

/// Initialize logging with the given configuration.
///
/// This should be called once at application startup. Panics if a global
/// subscriber is already installed; use [`try_init`] where that can happen.
pub fn init(config: LogConfig) {
    if let Err(err) = try_init(config) {
        panic!("failed to install tracing subscriber: {err}");
    }
}

/// Initialize logging, returning an error instead of panicking when a
/// global subscriber is already set.
pub fn try_init(config: LogConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let subscriber = tracing_subscriber::registry().with(filter_for(&config));

    if !config.print {
        // Spans still work, events go nowhere.
        return subscriber.try_init();
    }

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.test_writer {
        subscriber.with(fmt_layer.with_test_writer()).try_init()
    } else {
        subscriber.with(fmt_layer).try_init()
    }
}
