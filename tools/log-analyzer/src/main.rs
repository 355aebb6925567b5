//! Binary entrypoint: analyze, echo or generate access logs.
//!
//! Reports go to stdout; diagnostics and errors go to stderr. A log path of `-`
//! reads the log from stdin.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use log_analyzer::{
  generate, report, AnalyzerError, AnalyzerResult, Config, FileSource, GenerateConfig,
  LogAnalyzer, LogSource, MemorySource,
};

#[derive(Parser, Debug)]
#[command(
  name = "log-analyzer",
  version,
  about = "Hourly, daily and monthly access statistics for web server logs"
)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Count accesses and report busiest/quietest periods
  Analyze {
    /// Log file, or `-` for stdin
    file: PathBuf,

    #[arg(long, default_value_t = 24)]
    hour_buckets: usize,

    #[arg(long, default_value_t = 28)]
    day_buckets: usize,

    /// Emit one JSON summary object instead of the text report
    #[arg(long)]
    json: bool,
  },

  /// Echo the raw log lines
  Print {
    /// Log file, or `-` for stdin
    file: PathBuf,
  },

  /// Write a synthetic log, sorted by time
  Generate {
    #[arg(long, default_value_t = 100)]
    count: usize,

    #[arg(long, default_value_t = 2022)]
    year: u16,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Append an HTTP status code to every entry
    #[arg(long)]
    with_status: bool,

    /// Destination file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
}

fn main() {
  init_logging();
  let cli = Cli::parse();

  if let Err(e) = run(cli.command) {
    let _ = writeln!(io::stderr(), "log-analyzer: {}", e);
    std::process::exit(1);
  }
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn run(command: Command) -> AnalyzerResult<()> {
  let stdout = io::stdout();
  let mut out = BufWriter::new(stdout.lock());

  match command {
    Command::Analyze {
      file,
      hour_buckets,
      day_buckets,
      json,
    } => {
      let config = Config {
        hour_buckets,
        day_buckets,
        ..Config::default()
      };
      let mut analyzer = LogAnalyzer::new(open_source(&file)?, config)?;
      let summary = analyzer.summary()?;
      if json {
        report::write_json(&summary, &mut out)?;
      } else {
        report::write_summary(&summary, &mut out)?;
      }
    }

    Command::Print { file } => {
      report::write_raw(&*open_source(&file)?, &mut out)?;
    }

    Command::Generate {
      count,
      year,
      seed,
      with_status,
      output,
    } => {
      let config = GenerateConfig {
        count,
        year,
        seed,
        with_status,
      };
      match output {
        Some(path) => {
          let file = File::create(&path)
            .map_err(|e| AnalyzerError::unavailable(path.display().to_string(), e))?;
          let mut writer = BufWriter::new(file);
          let written = generate::write_log(&config, &mut writer)?;
          writer.flush()?;
          tracing::info!(path = %path.display(), written, "log written");
        }
        None => {
          generate::write_log(&config, &mut out)?;
        }
      }
    }
  }

  out.flush()?;
  Ok(())
}

fn open_source(path: &Path) -> AnalyzerResult<Box<dyn LogSource>> {
  if path.as_os_str() == "-" {
    let mut text = String::new();
    io::stdin()
      .read_to_string(&mut text)
      .map_err(|e| AnalyzerError::unavailable("<stdin>", e))?;
    return Ok(Box::new(MemorySource::new("<stdin>", text)));
  }
  Ok(Box::new(FileSource::new(path)))
}
