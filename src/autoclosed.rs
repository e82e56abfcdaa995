//! Recover autoclosed branches from the log.
//!
//! Renovate logs an autoclose marker line, then (a configured number of lines
//! further down) a line carrying the PR title. The offset is fixed: 0 means
//! the marker's immediate successor. A marker whose title line is missing or
//! does not match is fatal, since it almost always means the configured
//! offset is wrong for this log format.

use tracing::info;

use crate::config::Patterns;
use crate::error::EngineError;

/// One autoclosed branch discovered in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoclosedRecord {
  pub repository: Option<String>,
  pub title: Option<String>,
}

/// Single scan for autoclose markers, in encounter order.
pub fn extract_autoclosed(
  log: &str,
  patterns: &Patterns,
) -> Result<Vec<AutoclosedRecord>, EngineError> {
  let offset = patterns.autoclosed_title_offset;
  let lines: Vec<&str> = log.lines().map(str::trim).collect();
  let mut records = Vec::new();

  let mut i = 0;
  while i < lines.len() {
    let Some(caps) = patterns.autoclosed_marker.captures(lines[i]) else {
      i += 1;
      continue;
    };
    let repository = caps.name("repository_name").map(|m| m.as_str().to_string());

    let title_idx = i + offset + 1;
    let Some(title_line) = lines.get(title_idx) else {
      return Err(EngineError::AutoclosedOffsetMissing { offset });
    };
    let Some(title_caps) = patterns.autoclosed_title.captures(title_line) else {
      return Err(EngineError::AutoclosedTitleNotFound {
        offset,
        line: title_line.to_string(),
      });
    };
    records.push(AutoclosedRecord {
      repository,
      title: title_caps.name("pr_title").map(|m| m.as_str().to_string()),
    });
    // Resume scanning right after the consumed title line.
    i = title_idx + 1;
  }

  info!("{} autoclosed branches found", records.len());
  Ok(records)
}
