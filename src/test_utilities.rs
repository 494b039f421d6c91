//! Shared helpers for unit and scenario tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::logger::{LogLevel, Logger, Options, Sink, Terminator};

/// In-memory sink whose clones share one buffer, so a test can hand one clone
/// to the logger and read back through another.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.lock().unwrap().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that rejects every write.
pub(crate) struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Terminator that records exit codes instead of exiting.
#[derive(Clone, Default)]
pub(crate) struct RecordingTerminator {
    codes: Arc<Mutex<Vec<i32>>>,
}

impl RecordingTerminator {
    pub(crate) fn codes(&self) -> Vec<i32> {
        self.codes.lock().unwrap().clone()
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self, code: i32) {
        self.codes.lock().unwrap().push(code);
    }
}

/// Logger writing into a fresh `SharedBuffer` at the given threshold.
pub(crate) fn buffered_logger(level: LogLevel) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger = Logger::with_options(Options {
        level: Some(level),
        output: Some(Sink::writer("buffer", buffer.clone())),
    });
    (logger, buffer)
}

/// Width of the `<date> <time> <zone> <tag> ` header at the start of `line`.
pub(crate) fn prefix_len(line: &str) -> usize {
    line.char_indices()
        .filter(|(_, c)| *c == ' ')
        .nth(3)
        .map(|(ix, _)| ix + 1)
        .expect("line has no record header")
}

/// Level tag and message text of a single-line record.
pub(crate) fn tag_and_message(line: &str) -> (char, &str) {
    let width = prefix_len(line);
    let tag = line[..width].chars().rev().nth(1).expect("header has a tag");
    (tag, &line[width..])
}
