//! Severity levels for the stamplog writer.
//!
//! Levels form a single total order, from the silent sentinel up to the most
//! verbose level:
//!
//! `None < Fatal < Error < Warn < Info < Verbose < Debug < Trace`
//!
//! A logger configured with threshold `T` emits a record at level `L` iff
//! `T >= L`. Raising the threshold therefore lets *more* records through;
//! `None` as a threshold lets nothing through except `Fatal`, which bypasses
//! the threshold entirely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::LoggerError;

#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    None = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    #[default]
    Info = 4,
    Verbose = 5,
    Debug = 6,
    Trace = 7,
}

impl LogLevel {
    /// Every level in ascending order.
    pub const ALL: [LogLevel; 8] = [
        LogLevel::None,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Human readable name, used by `Display` and in the logger's own records.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "None",
            LogLevel::Fatal => "Fatal",
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Verbose => "Verbose",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Single character written after the timestamp. The silent level has no
    /// letter and renders as a space.
    pub fn tag(&self) -> char {
        match self {
            LogLevel::None => ' ',
            other => other.as_str().as_bytes()[0] as char,
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(raw: u8) -> LogLevel {
        match raw {
            0 => LogLevel::None,
            1 => LogLevel::Fatal,
            2 => LogLevel::Error,
            3 => LogLevel::Warn,
            4 => LogLevel::Info,
            5 => LogLevel::Verbose,
            6 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "silent" => Ok(LogLevel::None),
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "verbose" => Ok(LogLevel::Verbose),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggerError::UnknownLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
