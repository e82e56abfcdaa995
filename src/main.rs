//! Binary entrypoint: mine a Renovate dry-run job log and write an HTML report.
//!
//! Reads the whole log up front; any parsing error aborts the run with a
//! nonzero exit and no output file.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use dryrun_report::{analyze_log, html, EngineError, Patterns};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
  name = "dryrun-report",
  about = "Generate an HTML report from a Renovate dry-run job log (DEBUG level), \
           showing each PR Renovate would create, update, skip, or discard."
)]
struct Args {
  /// Path to the Renovate dry-run log file.
  #[arg(long)]
  log: PathBuf,

  /// Path for the HTML report. If this is an existing directory, a
  /// timestamped file name is generated inside it.
  #[arg(long)]
  out: PathBuf,

  /// Path to the JSON configuration file with the regex patterns to look
  /// for in the log.
  #[arg(long)]
  config: PathBuf,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_target(false)
    .init();

  let args = Args::parse();
  if let Err(e) = run(&args) {
    eprintln!("dryrun-report: {e}");
    process::exit(1);
  }
}

fn run(args: &Args) -> Result<(), EngineError> {
  info!("reading configuration file {}", args.config.display());
  let config_text = fs::read_to_string(&args.config)?;
  let patterns = Patterns::from_json(&config_text)?;

  info!("reading log file {}", args.log.display());
  let log = fs::read_to_string(&args.log)?;

  let report = analyze_log(&log, &patterns)?;
  let page = html::render(&report);

  let out_path = resolve_output_path(&args.out);
  if let Some(parent) = out_path.parent() {
    if !parent.as_os_str().is_empty() {
      fs::create_dir_all(parent)?;
    }
  }
  fs::write(&out_path, page)?;
  info!("HTML report written to {}", out_path.display());
  Ok(())
}

/// An existing directory gets a timestamped file name inside it; anything
/// else is taken as the file path verbatim.
fn resolve_output_path(out: &Path) -> PathBuf {
  if out.is_dir() {
    let stamp = chrono::Local::now().format("%d-%m-%Y_%H-%M-%S");
    out.join(format!("DryRunovateReport_{stamp}.html"))
  } else {
    out.to_path_buf()
  }
}
