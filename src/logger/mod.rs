//! Top-level logger exports and a small global facade.
//!
//! This module re-exports the logging primitives and exposes a process-wide
//! logger for programs that do not want to thread a `Logger` through every
//! call site.
//!
//! - `Logger`: the leveled, timestamped writer
//! - `LogLevel`: ordered severities
//! - `Sink`: the output destination
//! - `Options`: construction-time settings
//!
//! ```rust,no_run
//! use stamplog::logger::{self, Logger};
//! logger::init_logger(Logger::new()).unwrap();
//! logger::info("app started");
//! ```

pub mod core;
pub mod format;
#[allow(clippy::module_inception)]
pub mod logger;
pub mod sink;

use std::sync::OnceLock;

pub use self::core::LogLevel;
pub use self::format::MessageParts;
pub use self::logger::{FATAL_EXIT_CODE, Logger, Options, ProcessExit, Terminator};
pub use self::sink::Sink;

use crate::error::LoggerError;

/// Process-wide logger used by the free functions below. Set at most once.
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the global logger for the lifetime of the program.
pub fn init_logger(logger: Logger) -> Result<(), LoggerError> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

pub fn global() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

/// Log through the global logger if set, otherwise no-op.
///
/// `Fatal` still terminates when no logger is installed, writing to standard
/// error through a default logger.
pub fn log(level: LogLevel, message: &str) {
    match (global(), level) {
        (Some(logger), LogLevel::Fatal) => logger.fatal(message),
        (None, LogLevel::Fatal) => Logger::new().fatal(message),
        (Some(logger), level) => logger.emit(level, message),
        (None, _) => {}
    }
}

/// Convenience functions
pub fn trace(msg: &str) {
    log(LogLevel::Trace, msg);
}

pub fn debug(msg: &str) {
    log(LogLevel::Debug, msg);
}

pub fn verbose(msg: &str) {
    log(LogLevel::Verbose, msg);
}

pub fn info(msg: &str) {
    log(LogLevel::Info, msg);
}

pub fn warn(msg: &str) {
    log(LogLevel::Warn, msg);
}

pub fn error(msg: &str) {
    log(LogLevel::Error, msg);
}

pub fn fatal(msg: &str) {
    log(LogLevel::Fatal, msg);
}

/// `logger.tracef(format_args!(..))` with `format!` syntax.
#[macro_export]
macro_rules! tracef {
    ($logger:expr, $($arg:tt)+) => {
        $logger.tracef(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! verbosef {
    ($logger:expr, $($arg:tt)+) => {
        $logger.verbosef(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Writes a formatted fatal record and terminates.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}
