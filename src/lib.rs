//! Leveled, timestamped log writer.
//!
//! Records look like `2026-10-19 14:03:07.512 UTC I message`, with the lines
//! of a multi-line message aligned under the first one.

pub mod config;
pub mod error;
pub mod logger;

pub use error::LoggerError;
pub use logger::{LogLevel, Logger, Options, Sink};

#[cfg(test)]
mod test_utilities;
