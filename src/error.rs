//! Error type shared by the logger, its configuration loader and the facade.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    /// The sink rejected a write, or an output file could not be opened.
    #[error("log sink I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid logger config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown log level '{0}'")]
    UnknownLevel(String),

    #[error("global logger already initialized")]
    AlreadyInitialized,
}
