//! Output boundary: hourly table, raw echo, human and JSON summaries.

use std::io::{BufRead, Write};

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::reader::LogSource;
use crate::types::Summary;

const MONTH_NAMES: [&str; 12] = [
  "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `Hr: Count` header, then one `<hour>: <count>` line per bucket.
pub fn write_hourly_counts(counts: &[u64], out: &mut impl Write) -> std::io::Result<()> {
  writeln!(out, "Hr: Count")?;
  for (hour, count) in counts.iter().enumerate() {
    writeln!(out, "{}: {}", hour, count)?;
  }
  Ok(())
}

/// Copy every line of a fresh read of `source` to `out`, unparsed.
pub fn write_raw(source: &dyn LogSource, out: &mut impl Write) -> AnalyzerResult<()> {
  let handle = source
    .open()
    .map_err(|e| AnalyzerError::unavailable(source.describe(), e))?;
  for line in handle.lines() {
    writeln!(out, "{}", line?)?;
  }
  Ok(())
}

pub fn write_summary(summary: &Summary, out: &mut impl Write) -> std::io::Result<()> {
  writeln!(out, "Source: {}", summary.source)?;
  writeln!(out, "Total accesses: {}", summary.total_accesses)?;
  writeln!(out, "Busiest hour: {}", summary.busiest_hour)?;
  writeln!(out, "Quietest hour: {}", summary.quietest_hour)?;
  writeln!(
    out,
    "Busiest two hours: {}-{}",
    summary.busiest_two_hours,
    summary.busiest_two_hours + 1
  )?;
  writeln!(out, "Busiest day: {}", summary.busiest_day + 1)?;
  writeln!(out, "Quietest day: {}", summary.quietest_day + 1)?;
  writeln!(out, "Busiest month: {}", month_label(summary.busiest_month))?;
  writeln!(out, "Quietest month: {}", month_label(summary.quietest_month))?;
  writeln!(out)?;
  write_hourly_counts(&summary.hour_counts, out)
}

/// One JSON object followed by a newline.
pub fn write_json(summary: &Summary, out: &mut impl Write) -> AnalyzerResult<()> {
  serde_json::to_writer(&mut *out, summary)?;
  writeln!(out)?;
  Ok(())
}

/// Render a month bucket index as its calendar number and name.
fn month_label(index: usize) -> String {
  match MONTH_NAMES.get(index) {
    Some(name) => format!("{} ({})", index + 1, name),
    None => (index + 1).to_string(),
  }
}
