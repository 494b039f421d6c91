//! The leveled, timestamped log writer.
//!
//! `Logger` owns a threshold, a sink and the lock that serializes writes to
//! it. Every emission path ends in [`Logger::write`], which holds the lock for
//! the whole record, so records from concurrent threads never interleave.
//!
//! ```rust,no_run
//! use stamplog::logger::{LogLevel, Logger, Options, Sink};
//! use stamplog::infof;
//!
//! let logger = Logger::with_options(Options {
//!     level: Some(LogLevel::Debug),
//!     output: Some(Sink::stdout()),
//! });
//! logger.info("starting\nwith two lines");
//! infof!(logger, "listening on port {}", 8080);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::core::LogLevel;
use super::format::{MessageParts, build_formatted, build_message, prefix};
use super::sink::Sink;
use crate::error::LoggerError;

/// What happens after a fatal record has been written.
///
/// Production loggers exit the process; tests install a stub that returns.
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Exits the process with the given status.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code)
    }
}

/// Construction-time settings. Absent fields fall back to `Info` and
/// standard error.
#[derive(Debug, Default)]
pub struct Options {
    pub level: Option<LogLevel>,
    pub output: Option<Sink>,
}

/// Exit status used by the fatal path.
pub const FATAL_EXIT_CODE: i32 = 1;

pub struct Logger {
    level: AtomicU8,
    sink: Mutex<Sink>,
    terminator: Box<dyn Terminator>,
}

impl Logger {
    /// Logger at `Info` writing to standard error.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            level: AtomicU8::new(options.level.unwrap_or_default().as_u8()),
            sink: Mutex::new(options.output.unwrap_or_default()),
            terminator: Box::new(ProcessExit),
        }
    }

    /// Replaces the fatal-path terminator.
    pub fn with_terminator<T: Terminator + 'static>(mut self, terminator: T) -> Self {
        self.terminator = Box::new(terminator);
        self
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Whether a record at `level` would currently be written.
    pub fn enabled(&self, level: LogLevel) -> bool {
        if level == LogLevel::Fatal {
            return true;
        }
        let threshold = self.level();
        threshold != LogLevel::None && threshold >= level
    }

    /// Sets the threshold, then reports it at `Info`.
    pub fn set_level(&self, level: LogLevel) {
        {
            let _sink = self.lock_sink();
            self.level.store(level.as_u8(), Ordering::Relaxed);
        }
        self.infof(format_args!("log level set to {level}"));
    }

    /// Swaps the sink; `None` goes back to standard error. The previous sink
    /// is dropped once the swap is done.
    pub fn set_output(&self, output: Option<Sink>) {
        let name = {
            let mut sink = self.lock_sink();
            *sink = output.unwrap_or_default();
            sink.name().to_string()
        };
        self.debugf(format_args!("output set to {name}"));
    }

    pub fn output_name(&self) -> String {
        self.lock_sink().name().to_string()
    }

    pub fn output_is_stderr(&self) -> bool {
        self.lock_sink().is_stderr()
    }

    /// Writes one record to the sink while holding the lock.
    ///
    /// The record is terminated by exactly one newline: one is appended when
    /// missing, none when already present. Returns the number of bytes
    /// written, or the sink's error unchanged.
    pub fn write(&self, payload: &[u8]) -> io::Result<usize> {
        let record: Cow<'_, [u8]> = if payload.last() == Some(&b'\n') {
            Cow::Borrowed(payload)
        } else {
            let mut owned = Vec::with_capacity(payload.len() + 1);
            owned.extend_from_slice(payload);
            owned.push(b'\n');
            Cow::Owned(owned)
        };

        let mut sink = self.lock_sink();
        sink.write_record(&record)?;
        Ok(record.len())
    }

    /// Fallible form of the plain per-level calls. `Fatal` is written but
    /// does not terminate here.
    pub fn log<P: MessageParts>(&self, level: LogLevel, parts: P) -> Result<(), LoggerError> {
        if !self.enabled(level) {
            return Ok(());
        }
        let message = build_message(&prefix(level), &parts);
        self.write(message.as_bytes())?;
        Ok(())
    }

    /// Fallible form of the formatted per-level calls.
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<(), LoggerError> {
        if !self.enabled(level) {
            return Ok(());
        }
        let message = build_formatted(&prefix(level), args);
        self.write(message.as_bytes())?;
        Ok(())
    }

    pub fn trace<P: MessageParts>(&self, parts: P) {
        self.emit(LogLevel::Trace, parts);
    }

    pub fn tracef(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(LogLevel::Trace, args);
    }

    pub fn debug<P: MessageParts>(&self, parts: P) {
        self.emit(LogLevel::Debug, parts);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(LogLevel::Debug, args);
    }

    pub fn verbose<P: MessageParts>(&self, parts: P) {
        self.emit(LogLevel::Verbose, parts);
    }

    pub fn verbosef(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(LogLevel::Verbose, args);
    }

    pub fn info<P: MessageParts>(&self, parts: P) {
        self.emit(LogLevel::Info, parts);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(LogLevel::Info, args);
    }

    pub fn warn<P: MessageParts>(&self, parts: P) {
        self.emit(LogLevel::Warn, parts);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(LogLevel::Warn, args);
    }

    pub fn error<P: MessageParts>(&self, parts: P) {
        self.emit(LogLevel::Error, parts);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit_fmt(LogLevel::Error, args);
    }

    /// Writes the record regardless of the threshold, then terminates with
    /// status 1. The terminator runs even when the write fails.
    pub fn fatal<P: MessageParts>(&self, parts: P) {
        let message = build_message(&prefix(LogLevel::Fatal), &parts);
        self.finish_fatal(self.write(message.as_bytes()));
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        let message = build_formatted(&prefix(LogLevel::Fatal), args);
        self.finish_fatal(self.write(message.as_bytes()));
    }

    /// Plain emission; a broken sink is unrecoverable.
    pub(crate) fn emit<P: MessageParts>(&self, level: LogLevel, parts: P) {
        if let Err(err) = self.log(level, parts) {
            panic!("stamplog: {err}");
        }
    }

    fn emit_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if let Err(err) = self.log_fmt(level, args) {
            panic!("stamplog: {err}");
        }
    }

    fn finish_fatal(&self, written: io::Result<usize>) {
        if let Err(err) = written {
            // Last resort: the sink is gone, so report on the raw stream.
            let _ = writeln!(io::stderr(), "stamplog: fatal record lost: {err}");
        }
        self.terminator.terminate(FATAL_EXIT_CODE);
    }

    fn lock_sink(&self) -> MutexGuard<'_, Sink> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("output", &self.output_name())
            .finish_non_exhaustive()
    }
}
