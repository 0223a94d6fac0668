//! Pluggable diagnostic logging.
//!
//! The store reports what it is doing through a [`Logger`]. Nothing written to
//! a logger affects storage behavior. Two sinks ship with the crate:
//! [`ConsoleLogger`] (the default) and [`LogFacade`], which hands messages to
//! whatever backend is installed for the `log` crate.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Message severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Fatal => "FATAL",
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fatal" => Ok(Level::Fatal),
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// A leveled sink for diagnostic messages.
///
/// Formatting is done by the caller with `format_args!`, so implementations
/// only decide where (and whether) a message goes.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args)
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args)
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args)
    }
}

/// Writes `LEVEL message` lines to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    level: Level,
}

impl ConsoleLogger {
    /// Log everything at `level` or more severe.
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        // Diagnostics must never fail a store operation.
        let _ = writeln!(out, "{:<5} {}", level, args);
    }
}

/// Forwards messages to the `log` crate.
///
/// `log` has no fatal level, so fatal messages are emitted as errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        match level {
            Level::Fatal | Level::Error => log::error!("{}", args),
            Level::Warn => log::warn!("{}", args),
            Level::Info => log::info!("{}", args),
            Level::Debug => log::debug!("{}", args),
            Level::Trace => log::trace!("{}", args),
        }
    }
}
