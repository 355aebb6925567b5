//! Parse raw access log lines into `LogEntry` values.
//!
//! Layout: whitespace-separated integers `year month day hour minute [status]`.

use std::str::FromStr;

use crate::error::MalformedEntry;
use crate::types::LogEntry;

/// Parse one raw line. Pure; no side effects.
pub fn parse_line(line: &str) -> Result<LogEntry, MalformedEntry> {
  let mut fields = line.split_ascii_whitespace();

  let year: u16 = next_field(&mut fields, "year")?;
  let month: u8 = next_field(&mut fields, "month")?;
  let day: u8 = next_field(&mut fields, "day")?;
  let hour: u8 = next_field(&mut fields, "hour")?;
  let minute: u8 = next_field(&mut fields, "minute")?;

  check_range("month", month, 1, 12)?;
  check_range("day", day, 1, 31)?;
  check_range("hour", hour, 0, 23)?;
  check_range("minute", minute, 0, 59)?;

  let status = match fields.next() {
    Some(raw) => {
      let code: u16 = parse_number(raw, "status")?;
      if !(100..=599).contains(&code) {
        return Err(MalformedEntry::new(
          "status",
          format!("{} outside 100..=599", code),
        ));
      }
      Some(code)
    }
    None => None,
  };

  if let Some(extra) = fields.next() {
    return Err(MalformedEntry::new(
      "line",
      format!("unexpected trailing field {:?}", extra),
    ));
  }

  Ok(LogEntry {
    year,
    month,
    day,
    hour,
    minute,
    status,
  })
}

fn next_field<'a, T: FromStr>(
  fields: &mut impl Iterator<Item = &'a str>,
  name: &'static str,
) -> Result<T, MalformedEntry> {
  let raw = fields
    .next()
    .ok_or_else(|| MalformedEntry::new(name, "missing"))?;
  parse_number(raw, name)
}

fn parse_number<T: FromStr>(raw: &str, name: &'static str) -> Result<T, MalformedEntry> {
  // `u8::from_str` accepts a leading '+', the log layout does not.
  if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
    return Err(MalformedEntry::new(name, format!("not a number: {:?}", raw)));
  }
  raw
    .parse()
    .map_err(|_| MalformedEntry::new(name, format!("{} is out of range", raw)))
}

fn check_range(name: &'static str, value: u8, min: u8, max: u8) -> Result<(), MalformedEntry> {
  if value < min || value > max {
    return Err(MalformedEntry::new(
      name,
      format!("{} outside {}..={}", value, min, max),
    ));
  }
  Ok(())
}
