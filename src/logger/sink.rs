//! Output destinations.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// The single destination a `Logger` writes to.
///
/// A sink is either one of the process's standard streams or a named writer
/// handed over by the caller. The logger writes and flushes through it but
/// never closes anything itself; a caller that wants to keep using the
/// underlying file should pass a `try_clone` of it.
pub struct Sink {
    target: Target,
}

enum Target {
    Stderr,
    Stdout,
    Writer {
        name: String,
        inner: Box<dyn Write + Send>,
    },
}

impl Sink {
    pub fn stderr() -> Self {
        Self { target: Target::Stderr }
    }

    pub fn stdout() -> Self {
        Self { target: Target::Stdout }
    }

    /// Wraps an arbitrary writer; `name` identifies it in the logger's own
    /// records.
    pub fn writer<W>(name: impl Into<String>, inner: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            target: Target::Writer {
                name: name.into(),
                inner: Box::new(inner),
            },
        }
    }

    pub fn file(name: impl Into<String>, file: File) -> Self {
        Self::writer(name, file)
    }

    /// Opens `path` for appending, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::file(path.display().to_string(), file))
    }

    pub fn name(&self) -> &str {
        match &self.target {
            Target::Stderr => "stderr",
            Target::Stdout => "stdout",
            Target::Writer { name, .. } => name.as_str(),
        }
    }

    pub fn is_stderr(&self) -> bool {
        matches!(self.target, Target::Stderr)
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self.target, Target::Stdout)
    }

    /// Writes the whole record and flushes it.
    pub(crate) fn write_record(&mut self, record: &[u8]) -> io::Result<()> {
        match &mut self.target {
            Target::Stderr => {
                let mut stderr = io::stderr().lock();
                stderr.write_all(record)?;
                stderr.flush()
            }
            Target::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(record)?;
                stdout.flush()
            }
            Target::Writer { inner, .. } => {
                inner.write_all(record)?;
                inner.flush()
            }
        }
    }
}

impl Default for Sink {
    fn default() -> Self {
        Sink::stderr()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sink").field(&self.name()).finish()
    }
}
