//! Core types for the log analyzer (parsed entries, reader state, report contract).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parsed entry
// ---------------------------------------------------------------------------

/// One access record. Field order gives chronological ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LogEntry {
  pub year: u16,
  /// 1..=12
  pub month: u8,
  /// 1..=31
  pub day: u8,
  /// 0..=23
  pub hour: u8,
  /// 0..=59
  pub minute: u8,
  /// HTTP status code, when the log carries one.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<u16>,
}

impl LogEntry {
  pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Self {
    Self {
      year,
      month,
      day,
      hour,
      minute,
      status: None,
    }
  }

  pub fn with_status(mut self, status: u16) -> Self {
    self.status = Some(status);
    self
  }

  /// Calendar timestamp, or `None` when the date does not exist (e.g. Feb 30).
  pub fn timestamp(&self) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))?
      .and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
  }
}

/// Renders the canonical line layout accepted by `parse::parse_line`.
impl fmt::Display for LogEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {:02} {:02} {:02} {:02}",
      self.year, self.month, self.day, self.hour, self.minute
    )?;
    if let Some(status) = self.status {
      write!(f, " {}", status)?;
    }
    Ok(())
  }
}

// ---------------------------------------------------------------------------
// Reader lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle of a single-pass reader. Only `Open` can yield entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
  Open,
  Exhausted,
  Closed,
}

// ---------------------------------------------------------------------------
// Output types (JSON contract for `analyze --json`)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
  pub source: String,
  pub total_accesses: u64,
  pub busiest_hour: usize,
  pub quietest_hour: usize,
  pub busiest_two_hours: usize,
  /// Day bucket index, `day - 1`.
  pub busiest_day: usize,
  pub quietest_day: usize,
  /// Month bucket index, `month - 1`.
  pub busiest_month: usize,
  pub quietest_month: usize,
  pub hour_counts: Vec<u64>,
  pub day_counts: Vec<u64>,
  pub month_counts: Vec<u64>,
}
