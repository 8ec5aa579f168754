//! Logging setup for a router.
//!
//! The core emits `tracing` events. By default they go wherever the host process sends
//! them; [`Router::logging`](crate::Router::logging) instead routes one router's events to a
//! sink of its own, formatted per [`LoggingConfig`], without installing a global subscriber.
//!
//! ```
//! use lux::{LogFormat, LoggingConfig, Router};
//!
//! let mut router = Router::new();
//! router.logging(std::io::stdout, &LoggingConfig::default().with_format(LogFormat::Json)).unwrap();
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::io;
use std::str::FromStr;
use tracing::{Dispatch, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::UnknownLogFormat(s.to_string())),
        }
    }
}

/// Logging configuration.
///
/// `filter` uses the `tracing_subscriber::EnvFilter` directive syntax, e.g. `lux=debug`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: LogFormat::Full, filter: "info".to_string() }
    }
}

impl LoggingConfig {
    pub const FILTER_ENV: &'static str = "LUX_LOG";
    pub const FORMAT_ENV: &'static str = "LUX_LOG_FORMAT";

    /// Reads `LUX_LOG` and `LUX_LOG_FORMAT`, falling back to the defaults for unset variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(filter) = lookup(Self::FILTER_ENV) {
            config.filter = filter;
        }
        if let Some(format) = lookup(Self::FORMAT_ENV) {
            config.format = format.parse()?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Builds a dispatcher writing every event to `sink`, flushing it once the event is written.
pub(crate) fn dispatch<W>(sink: W, config: &LoggingConfig) -> Result<Dispatch, ConfigError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(&config.filter)?;
    let builder =
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(FlushPerEvent(sink)).with_ansi(false);

    let dispatch = match config.format {
        LogFormat::Full => Dispatch::new(builder.finish()),
        LogFormat::Compact => Dispatch::new(builder.compact().finish()),
        LogFormat::Json => Dispatch::new(builder.json().finish()),
    };
    Ok(dispatch)
}

/// Hands out writers that flush the underlying sink when the formatter is done with them.
///
/// The formatter asks for a fresh writer for every event, so each event ends in one flush.
#[derive(Debug)]
struct FlushPerEvent<M>(M);

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for FlushPerEvent<M> {
    type Writer = FlushOnDrop<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        FlushOnDrop(self.0.make_writer())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        FlushOnDrop(self.0.make_writer_for(meta))
    }
}

#[derive(Debug)]
struct FlushOnDrop<W: io::Write>(W);

impl<W: io::Write> io::Write for FlushOnDrop<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: io::Write> Drop for FlushOnDrop<W> {
    fn drop(&mut self) {
        let _ = self.0.flush();
    }
}
