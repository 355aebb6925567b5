//! Synthetic access log generation.

use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::GenerateConfig;
use crate::error::AnalyzerResult;
use crate::types::LogEntry;

/// Status codes drawn for generated entries.
pub const STATUS_CODES: [u16; 5] = [200, 301, 403, 404, 500];

/// Random entries for one year, sorted chronologically.
///
/// Days stay within 1..=28 so every entry is a real date in any month.
pub fn generate_entries(config: &GenerateConfig) -> AnalyzerResult<Vec<LogEntry>> {
  config.validate()?;
  let mut rng = match config.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_os_rng(),
  };

  let mut entries: Vec<LogEntry> = (0..config.count)
    .map(|_| {
      let entry = LogEntry::new(
        config.year,
        rng.random_range(1..=12),
        rng.random_range(1..=28),
        rng.random_range(0..=23),
        rng.random_range(0..=59),
      );
      if config.with_status {
        entry.with_status(STATUS_CODES[rng.random_range(0..STATUS_CODES.len())])
      } else {
        entry
      }
    })
    .collect();
  entries.sort();
  Ok(entries)
}

/// Write generated entries one per line. Returns the number written.
pub fn write_log(config: &GenerateConfig, out: &mut impl Write) -> AnalyzerResult<usize> {
  let entries = generate_entries(config)?;
  for entry in &entries {
    writeln!(out, "{}", entry)?;
  }
  debug!(count = entries.len(), year = config.year, "generated log entries");
  Ok(entries.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parse::parse_line;

  fn seeded(count: usize) -> GenerateConfig {
    GenerateConfig {
      count,
      year: 2022,
      seed: Some(42),
      with_status: false,
    }
  }

  #[test]
  fn same_seed_same_log() {
    let a = generate_entries(&seeded(50)).unwrap();
    let b = generate_entries(&seeded(50)).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn entries_are_sorted_and_real_dates() {
    let entries = generate_entries(&seeded(200)).unwrap();
    assert_eq!(entries.len(), 200);
    assert!(entries.windows(2).all(|w| w[0] <= w[1]));
    assert!(entries.iter().all(|e| e.year == 2022 && e.timestamp().is_some()));
  }

  #[test]
  fn status_only_when_requested() {
    assert!(generate_entries(&seeded(20)).unwrap().iter().all(|e| e.status.is_none()));

    let config = GenerateConfig {
      with_status: true,
      ..seeded(20)
    };
    let entries = generate_entries(&config).unwrap();
    assert!(entries
      .iter()
      .all(|e| e.status.is_some_and(|s| STATUS_CODES.contains(&s))));
  }

  #[test]
  fn written_lines_parse_back() {
    let mut out = Vec::new();
    let written = write_log(&seeded(30), &mut out).unwrap();
    assert_eq!(written, 30);
    let text = String::from_utf8(out).unwrap();
    let parsed: Vec<LogEntry> = text.lines().map(|l| parse_line(l).unwrap()).collect();
    assert_eq!(parsed, generate_entries(&seeded(30)).unwrap());
  }

  #[test]
  fn zero_count_rejected() {
    assert!(generate_entries(&seeded(0)).is_err());
  }
}
