//! JSON configuration for a `Logger`.
//!
//! ```json
//! { "level": "debug", "output": "/var/log/app.log" }
//! ```
//!
//! Both fields are optional. `output` is `"stderr"`, `"stdout"` or a file
//! path; files are opened for appending and created if missing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::LoggerError;
use crate::logger::{LogLevel, Options, Sink};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    #[serde(default)]
    pub level: Option<LogLevel>,
    #[serde(default)]
    pub output: Option<OutputTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stderr,
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "stderr" | "" => OutputTarget::Stderr,
            "stdout" | "-" => OutputTarget::Stdout,
            path => OutputTarget::File(PathBuf::from(path)),
        }
    }

    pub fn open(&self) -> io::Result<Sink> {
        match self {
            OutputTarget::Stderr => Ok(Sink::stderr()),
            OutputTarget::Stdout => Ok(Sink::stdout()),
            OutputTarget::File(path) => Sink::append_to(path),
        }
    }
}

impl<'de> Deserialize<'de> for OutputTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(OutputTarget::parse(&raw))
    }
}

impl LoggerConfig {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Resolves the config into construction options, opening the output
    /// file if one is named.
    pub fn into_options(self) -> Result<Options, LoggerError> {
        let output = self.output.as_ref().map(OutputTarget::open).transpose()?;
        Ok(Options {
            level: self.level,
            output,
        })
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<LoggerConfig, LoggerError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    LoggerConfig::from_json(&content).map_err(|source| LoggerError::Config {
        path: path.to_path_buf(),
        source,
    })
}
