//! Web access log analyzer: single-pass hourly, daily and monthly access statistics.
//!
//! Reads a log of `year month day hour minute [status]` records, counts every
//! entry into hour, day and month buckets in one traversal, and answers
//! busiest/quietest queries over those counters.
//!
//! No DB, no network; one read-only input file and in-memory counters.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod generate;
pub mod parse;
pub mod reader;
pub mod report;
pub mod stats;
pub mod types;

pub use analyzer::LogAnalyzer;
pub use config::{Config, GenerateConfig};
pub use error::{AnalyzerError, AnalyzerResult, MalformedEntry};
pub use parse::parse_line;
pub use reader::{FileSource, LogSource, LogfileReader, MemorySource};
pub use types::{LogEntry, ReaderState, Summary};
