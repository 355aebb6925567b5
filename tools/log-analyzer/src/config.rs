//! Analyzer configuration with sane defaults.

use crate::error::{AnalyzerError, AnalyzerResult};

/// Counter array sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// Hour-of-day buckets. An entry whose hour is >= this is malformed.
  pub hour_buckets: usize,
  /// Day-of-month buckets, indexed by `day - 1`.
  pub day_buckets: usize,
  /// Month-of-year buckets, indexed by `month - 1`.
  pub month_buckets: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      hour_buckets: 24,
      day_buckets: 28,
      month_buckets: 12,
    }
  }
}

impl Config {
  pub fn with_hour_buckets(hour_buckets: usize) -> Self {
    Self {
      hour_buckets,
      ..Self::default()
    }
  }

  pub fn validate(&self) -> AnalyzerResult<()> {
    if self.hour_buckets == 0 {
      return Err(AnalyzerError::invalid_config("hour_buckets", "must be at least 1"));
    }
    if self.day_buckets == 0 {
      return Err(AnalyzerError::invalid_config("day_buckets", "must be at least 1"));
    }
    if self.month_buckets == 0 {
      return Err(AnalyzerError::invalid_config("month_buckets", "must be at least 1"));
    }
    Ok(())
  }
}

/// Settings for synthetic log generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub count: usize,
  pub year: u16,
  /// Fixed seed for reproducible output; `None` seeds from the OS.
  pub seed: Option<u64>,
  pub with_status: bool,
}

impl Default for GenerateConfig {
  fn default() -> Self {
    Self {
      count: 100,
      year: 2022,
      seed: None,
      with_status: false,
    }
  }
}

impl GenerateConfig {
  pub fn validate(&self) -> AnalyzerResult<()> {
    if self.count == 0 {
      return Err(AnalyzerError::invalid_config("count", "must be at least 1"));
    }
    Ok(())
  }
}
