//! Core analyzer: drains the reader once, fills the counters, answers queries.

use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AnalyzerError, AnalyzerResult, MalformedEntry};
use crate::reader::{FileSource, LogSource, LogfileReader};
use crate::report;
use crate::stats::BucketCounts;
use crate::types::{ReaderState, Summary};

/// Hourly, daily and monthly access counts for one log source.
///
/// The source is read exactly once. `analyze_hourly_data` performs that pass and
/// fills all three counter arrays; day and month queries run it on demand.
pub struct LogAnalyzer {
  config: Config,
  source: Box<dyn LogSource>,
  reader: LogfileReader,
  hour_counts: BucketCounts,
  day_counts: BucketCounts,
  month_counts: BucketCounts,
  analyzed: bool,
}

impl LogAnalyzer {
  pub fn new(source: impl LogSource + 'static, config: Config) -> AnalyzerResult<Self> {
    config.validate()?;
    let reader = LogfileReader::open(&source)?;

    Ok(Self {
      config,
      source: Box::new(source),
      reader,
      hour_counts: BucketCounts::new(config.hour_buckets),
      day_counts: BucketCounts::new(config.day_buckets),
      month_counts: BucketCounts::new(config.month_buckets),
      analyzed: false,
    })
  }

  /// Analyze a log file with the default 24 hour buckets.
  pub fn open(path: impl Into<PathBuf>) -> AnalyzerResult<Self> {
    Self::new(FileSource::new(path), Config::default())
  }

  pub fn with_buckets(path: impl Into<PathBuf>, bucket_count: usize) -> AnalyzerResult<Self> {
    Self::new(FileSource::new(path), Config::with_hour_buckets(bucket_count))
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn reader_state(&self) -> ReaderState {
    self.reader.state()
  }

  /// Drain the reader, counting every entry by hour, day and month.
  ///
  /// Fails with `SourceExhausted` if the source was already traversed. A
  /// malformed line aborts the pass, closes the reader and leaves the counters
  /// untouched.
  pub fn analyze_hourly_data(&mut self) -> AnalyzerResult<()> {
    if let Err(e) = self.reader.ensure_open() {
      warn!(source = %self.reader.source_name(), "traversal requested on exhausted source");
      return Err(e);
    }

    match self.count_entries() {
      Ok((hours, days, months)) => {
        self.hour_counts = hours;
        self.day_counts = days;
        self.month_counts = months;
        self.analyzed = true;
        info!(
          source = %self.reader.source_name(),
          entries = self.hour_counts.total(),
          lines = self.reader.line_number(),
          "analysis pass complete"
        );
        Ok(())
      }
      Err(e) => {
        self.reader.close();
        warn!(source = %self.reader.source_name(), error = %e, "analysis pass aborted");
        Err(e)
      }
    }
  }

  fn count_entries(&mut self) -> AnalyzerResult<(BucketCounts, BucketCounts, BucketCounts)> {
    let mut hours = BucketCounts::new(self.config.hour_buckets);
    let mut days = BucketCounts::new(self.config.day_buckets);
    let mut months = BucketCounts::new(self.config.month_buckets);

    while let Some(entry) = self.reader.next() {
      let entry = entry?;
      let line = self.reader.line_number();
      record(&mut hours, usize::from(entry.hour), "hour", entry.hour, line)?;
      record(&mut days, usize::from(entry.day) - 1, "day", entry.day, line)?;
      record(&mut months, usize::from(entry.month) - 1, "month", entry.month, line)?;
    }

    Ok((hours, days, months))
  }

  fn ensure_analyzed(&mut self) -> AnalyzerResult<()> {
    if !self.analyzed {
      self.analyze_hourly_data()?;
    }
    Ok(())
  }

  /// Total entries counted. Reads the counters only; zero before any pass.
  pub fn number_of_accesses(&self) -> u64 {
    self.hour_counts.total()
  }

  /// Hour queries read the counters only and never start a traversal, so they
  /// see all-zero counters until `analyze_hourly_data` has run.
  pub fn busiest_hour(&self) -> usize {
    self.hour_counts.busiest()
  }

  pub fn quietest_hour(&self) -> usize {
    self.hour_counts.quietest()
  }

  /// First hour of the busiest adjacent two-hour window. Counters only.
  pub fn busiest_two_hours(&self) -> usize {
    self.hour_counts.busiest_pair()
  }

  /// Bucket index of the busiest day, `day - 1`. Runs the pass if none has.
  pub fn busiest_day(&mut self) -> AnalyzerResult<usize> {
    self.ensure_analyzed()?;
    Ok(self.day_counts.busiest())
  }

  pub fn quietest_day(&mut self) -> AnalyzerResult<usize> {
    self.ensure_analyzed()?;
    Ok(self.day_counts.quietest())
  }

  /// Bucket index of the busiest month, `month - 1`.
  pub fn busiest_month(&mut self) -> AnalyzerResult<usize> {
    self.ensure_analyzed()?;
    Ok(self.month_counts.busiest())
  }

  pub fn quietest_month(&mut self) -> AnalyzerResult<usize> {
    self.ensure_analyzed()?;
    Ok(self.month_counts.quietest())
  }

  pub fn hour_counts(&self) -> &[u64] {
    self.hour_counts.as_slice()
  }

  pub fn day_counts(&self) -> &[u64] {
    self.day_counts.as_slice()
  }

  pub fn month_counts(&self) -> &[u64] {
    self.month_counts.as_slice()
  }

  /// Every statistic at once, running the pass first if needed.
  pub fn summary(&mut self) -> AnalyzerResult<Summary> {
    self.ensure_analyzed()?;
    Ok(Summary {
      source: self.reader.source_name().to_string(),
      total_accesses: self.number_of_accesses(),
      busiest_hour: self.busiest_hour(),
      quietest_hour: self.quietest_hour(),
      busiest_two_hours: self.busiest_two_hours(),
      busiest_day: self.day_counts.busiest(),
      quietest_day: self.day_counts.quietest(),
      busiest_month: self.month_counts.busiest(),
      quietest_month: self.month_counts.quietest(),
      hour_counts: self.hour_counts.as_slice().to_vec(),
      day_counts: self.day_counts.as_slice().to_vec(),
      month_counts: self.month_counts.as_slice().to_vec(),
    })
  }

  /// Write the `Hr: Count` table. Counts are zero until a pass has run.
  pub fn print_hourly_counts(&self, out: &mut impl Write) -> AnalyzerResult<()> {
    report::write_hourly_counts(self.hour_counts.as_slice(), out)?;
    Ok(())
  }

  /// Echo the raw source lines from a fresh read; the counting reader is untouched.
  pub fn print_data(&self, out: &mut impl Write) -> AnalyzerResult<()> {
    report::write_raw(&*self.source, out)
  }
}

fn record(
  counts: &mut BucketCounts,
  index: usize,
  field: &'static str,
  value: u8,
  line: usize,
) -> AnalyzerResult<()> {
  if counts.record(index) {
    return Ok(());
  }
  Err(AnalyzerError::malformed(
    line,
    MalformedEntry::new(field, format!("{} exceeds {} buckets", value, counts.len())),
  ))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::reader::MemorySource;

  fn analyzer(text: &str) -> LogAnalyzer {
    LogAnalyzer::new(MemorySource::new("access.log", text), Config::default()).unwrap()
  }

  const SAMPLE: &str = "\
2022 03 01 10 00
2022 03 01 10 30
2022 03 02 11 15
2022 04 02 11 45
2022 04 02 11 50
2022 04 03 00 05
";

  #[test]
  fn counts_every_entry_once() {
    let mut a = analyzer(SAMPLE);
    a.analyze_hourly_data().unwrap();

    assert_eq!(a.number_of_accesses(), 6);
    assert_eq!(a.hour_counts()[10], 2);
    assert_eq!(a.hour_counts()[11], 3);
    assert_eq!(a.day_counts().iter().sum::<u64>(), 6);
    assert_eq!(a.month_counts().iter().sum::<u64>(), 6);
    assert_eq!(a.reader_state(), ReaderState::Exhausted);
  }

  #[test]
  fn hour_queries() {
    let mut a = analyzer(SAMPLE);
    a.analyze_hourly_data().unwrap();

    assert_eq!(a.busiest_hour(), 11);
    // Hour 1 is the first empty bucket.
    assert_eq!(a.quietest_hour(), 1);
    assert_eq!(a.busiest_two_hours(), 10);
  }

  #[test]
  fn day_and_month_share_the_single_pass() {
    let mut a = analyzer(SAMPLE);
    a.analyze_hourly_data().unwrap();

    // Day 2 lands in bucket 1.
    assert_eq!(a.busiest_day().unwrap(), 1);
    assert_eq!(a.quietest_day().unwrap(), 3);
    // March and April tie; the earlier month wins.
    assert_eq!(a.busiest_month().unwrap(), 2);
    assert_eq!(a.quietest_month().unwrap(), 0);
  }

  #[test]
  fn day_and_month_results_are_bucket_indices() {
    let mut a = analyzer("2022 01 01 10 00\n2022 01 01 11 00\n2022 02 02 12 00\n");
    a.analyze_hourly_data().unwrap();

    assert_eq!(a.busiest_day().unwrap(), 0);
    assert_eq!(a.busiest_month().unwrap(), 0);
    // Day 3 is the first empty bucket.
    assert_eq!(a.quietest_day().unwrap(), 2);
    assert_eq!(a.quietest_month().unwrap(), 2);
  }

  #[test]
  fn day_query_runs_the_pass_on_demand() {
    let mut a = analyzer(SAMPLE);
    assert_eq!(a.busiest_day().unwrap(), 1);
    assert_eq!(a.number_of_accesses(), 6);
  }

  #[test]
  fn second_pass_is_source_exhausted() {
    let mut a = analyzer(SAMPLE);
    a.analyze_hourly_data().unwrap();
    let err = a.analyze_hourly_data().unwrap_err();
    assert!(matches!(err, AnalyzerError::SourceExhausted(ref name) if name == "access.log"));
    // Counters from the first pass survive.
    assert_eq!(a.number_of_accesses(), 6);
  }

  #[test]
  fn empty_log_is_all_zero() {
    let mut a = analyzer("");
    a.analyze_hourly_data().unwrap();
    assert_eq!(a.number_of_accesses(), 0);
    assert_eq!(a.busiest_hour(), 0);
    assert_eq!(a.quietest_hour(), 0);
    assert!(a.hour_counts().iter().all(|&c| c == 0));
    assert_eq!(a.busiest_day().unwrap(), 0);
    assert_eq!(a.quietest_month().unwrap(), 0);
  }

  #[test]
  fn queries_before_pass_are_zero() {
    let a = analyzer(SAMPLE);
    assert_eq!(a.number_of_accesses(), 0);
    assert_eq!(a.busiest_hour(), 0);
    assert_eq!(a.busiest_two_hours(), 22);
    assert_eq!(a.reader_state(), ReaderState::Open);
  }

  #[test]
  fn malformed_line_aborts_without_partial_counts() {
    let mut a = analyzer("2022 03 01 10 00\n2022 03 01 24 00\n2022 03 01 10 00\n");
    let err = a.analyze_hourly_data().unwrap_err();
    match err {
      AnalyzerError::MalformedEntry { line, source } => {
        assert_eq!(line, 2);
        assert_eq!(source.field, "hour");
      }
      other => panic!("unexpected error: {other}"),
    }
    assert_eq!(a.number_of_accesses(), 0);
    assert_eq!(a.reader_state(), ReaderState::Closed);
    assert!(matches!(
      a.busiest_month(),
      Err(AnalyzerError::SourceExhausted(_))
    ));
  }

  #[test]
  fn day_beyond_configured_buckets_is_malformed() {
    let mut a = analyzer("2022 03 30 10 00\n");
    let err = a.analyze_hourly_data().unwrap_err();
    assert!(err.to_string().contains("exceeds 28 buckets"), "{err}");
  }

  #[test]
  fn custom_hour_buckets() {
    let source = MemorySource::new("twelve.log", "2022 01 01 11 00\n2022 01 01 13 00\n");
    let mut a = LogAnalyzer::new(source, Config::with_hour_buckets(12)).unwrap();
    let err = a.analyze_hourly_data().unwrap_err();
    assert!(matches!(err, AnalyzerError::MalformedEntry { line: 2, .. }));
  }

  #[test]
  fn zero_buckets_rejected_at_construction() {
    let err = LogAnalyzer::new(MemorySource::new("x", ""), Config::with_hour_buckets(0))
      .err()
      .unwrap();
    assert!(matches!(err, AnalyzerError::InvalidConfig { .. }));
  }

  #[test]
  fn print_hourly_counts_table() {
    let mut a = analyzer(SAMPLE);
    a.analyze_hourly_data().unwrap();
    let mut out = Vec::new();
    a.print_hourly_counts(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[0], "Hr: Count");
    assert_eq!(lines[11], "10: 2");
    assert_eq!(lines[24], "23: 0");
  }

  #[test]
  fn print_data_after_pass_echoes_raw_lines() {
    let mut a = analyzer(SAMPLE);
    a.analyze_hourly_data().unwrap();
    let mut out = Vec::new();
    a.print_data(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), SAMPLE);
  }

  #[test]
  fn summary_collects_everything() {
    let mut a = analyzer(SAMPLE);
    let s = a.summary().unwrap();
    assert_eq!(s.source, "access.log");
    assert_eq!(s.total_accesses, 6);
    assert_eq!(s.busiest_hour, 11);
    assert_eq!(s.busiest_day, 1);
    assert_eq!(s.busiest_month, 2);
    assert_eq!(s.hour_counts.len(), 24);
    assert_eq!(s.day_counts.len(), 28);
    assert_eq!(s.month_counts.len(), 12);
  }
}
