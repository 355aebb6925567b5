//! Single-pass log reader over a pluggable source.
//!
//! A `LogfileReader` holds the open handle only while it is `Open`. Reaching the
//! end of input, hitting a read or parse error, or calling `close` drops the
//! handle, and the reader never yields again.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, ErrorKind};
use std::path::PathBuf;

use tracing::debug;

use crate::error::{AnalyzerError, AnalyzerResult, MalformedEntry};
use crate::parse::parse_line;
use crate::types::{LogEntry, ReaderState};

/// Where raw log lines come from. Each `open` starts a fresh read.
pub trait LogSource {
  fn open(&self) -> io::Result<Box<dyn BufRead>>;

  /// Human-readable name used in errors and logs.
  fn describe(&self) -> String;
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
  fn open(&self) -> io::Result<Box<dyn BufRead>> {
    (**self).open()
  }

  fn describe(&self) -> String {
    (**self).describe()
  }
}

/// A log file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
  path: PathBuf,
}

impl FileSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl LogSource for FileSource {
  fn open(&self) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(&self.path)?;
    Ok(Box::new(BufReader::new(file)))
  }

  fn describe(&self) -> String {
    self.path.display().to_string()
  }
}

/// In-memory log text, for stdin and tests.
#[derive(Debug, Clone)]
pub struct MemorySource {
  name: String,
  text: String,
}

impl MemorySource {
  pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      text: text.into(),
    }
  }
}

impl LogSource for MemorySource {
  fn open(&self) -> io::Result<Box<dyn BufRead>> {
    Ok(Box::new(Cursor::new(self.text.clone().into_bytes())))
  }

  fn describe(&self) -> String {
    self.name.clone()
  }
}

/// Lazily parses entries from one read of a `LogSource`.
///
/// Blank lines are skipped. The first malformed line ends the traversal.
pub struct LogfileReader {
  source_name: String,
  lines: Option<io::Lines<Box<dyn BufRead>>>,
  state: ReaderState,
  line_number: usize,
  entries_read: usize,
}

impl LogfileReader {
  pub fn open(source: &dyn LogSource) -> AnalyzerResult<Self> {
    let source_name = source.describe();
    let handle = source
      .open()
      .map_err(|e| AnalyzerError::unavailable(source_name.clone(), e))?;
    debug!(source = %source_name, "opened log source");

    Ok(Self {
      source_name,
      lines: Some(handle.lines()),
      state: ReaderState::Open,
      line_number: 0,
      entries_read: 0,
    })
  }

  pub fn state(&self) -> ReaderState {
    self.state
  }

  pub fn is_exhausted(&self) -> bool {
    self.state != ReaderState::Open
  }

  pub fn source_name(&self) -> &str {
    &self.source_name
  }

  /// 1-based number of the last physical line read, blank lines included.
  pub fn line_number(&self) -> usize {
    self.line_number
  }

  pub fn entries_read(&self) -> usize {
    self.entries_read
  }

  /// Fails with `SourceExhausted` unless a traversal can still start.
  pub fn ensure_open(&self) -> AnalyzerResult<()> {
    if self.is_exhausted() {
      return Err(AnalyzerError::SourceExhausted(self.source_name.clone()));
    }
    Ok(())
  }

  /// Release the handle. Idempotent.
  pub fn close(&mut self) {
    self.lines = None;
    self.state = ReaderState::Closed;
  }

  fn finish(&mut self) {
    self.lines = None;
    if self.state == ReaderState::Open {
      self.state = ReaderState::Exhausted;
      debug!(
        source = %self.source_name,
        lines = self.line_number,
        entries = self.entries_read,
        "log source exhausted"
      );
    }
  }
}

impl Iterator for LogfileReader {
  type Item = AnalyzerResult<LogEntry>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let lines = self.lines.as_mut()?;
      let line = match lines.next() {
        Some(Ok(line)) => line,
        Some(Err(e)) if e.kind() == ErrorKind::InvalidData => {
          self.line_number += 1;
          self.finish();
          return Some(Err(AnalyzerError::malformed(
            self.line_number,
            MalformedEntry::new("line", "not valid UTF-8"),
          )));
        }
        Some(Err(e)) => {
          self.finish();
          return Some(Err(AnalyzerError::Io(e)));
        }
        None => {
          self.finish();
          return None;
        }
      };

      self.line_number += 1;
      if line.trim().is_empty() {
        continue;
      }

      return match parse_line(&line) {
        Ok(entry) => {
          self.entries_read += 1;
          Some(Ok(entry))
        }
        Err(e) => {
          self.finish();
          Some(Err(AnalyzerError::malformed(self.line_number, e)))
        }
      };
    }
  }
}
