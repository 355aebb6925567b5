//! Structured error types for the log analyzer.

use std::io;

use thiserror::Error;

/// A single log line that could not be turned into a `LogEntry`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct MalformedEntry {
  pub field: &'static str,
  pub reason: String,
}

impl MalformedEntry {
  pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
    Self {
      field,
      reason: reason.into(),
    }
  }
}

#[derive(Debug, Error)]
pub enum AnalyzerError {
  #[error("source unavailable: {source_name}: {source}")]
  SourceUnavailable {
    source_name: String,
    #[source]
    source: io::Error,
  },

  #[error("malformed entry on line {line}: {source}")]
  MalformedEntry {
    line: usize,
    #[source]
    source: MalformedEntry,
  },

  #[error("source exhausted: {0} has already been read to the end")]
  SourceExhausted(String),

  #[error("invalid config: {field}: {reason}")]
  InvalidConfig { field: String, reason: String },

  #[error("io: {0}")]
  Io(#[from] io::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl AnalyzerError {
  pub fn unavailable(source_name: impl Into<String>, source: io::Error) -> Self {
    Self::SourceUnavailable {
      source_name: source_name.into(),
      source,
    }
  }

  pub fn malformed(line: usize, source: MalformedEntry) -> Self {
    Self::MalformedEntry { line, source }
  }

  pub fn invalid_config(field: &str, reason: &str) -> Self {
    Self::InvalidConfig {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
