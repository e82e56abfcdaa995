//! Extract per-repository "branches information" sections from the log.
//!
//! A section opens on a line matching the start pattern (the repository name
//! is pulled from the same line) and closes on the end pattern. Everything in
//! between is collected verbatim for the decoder.

use tracing::{info, warn};

use crate::config::Patterns;
use crate::error::EngineError;

/// One delimited section: a repository and its raw body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
  pub repository: String,
  pub lines: Vec<String>,
}

/// Scan the log for delimited sections, in encounter order.
///
/// If a repository's section recurs, the later body wins but the section
/// keeps its first-seen position. An opened section that never closes is
/// fatal; a log with zero sections is not.
pub fn extract_sections(log: &str, patterns: &Patterns) -> Result<Vec<RawSection>, EngineError> {
  let mut sections: Vec<RawSection> = Vec::new();
  let mut current: Option<RawSection> = None;
  let mut saw_line = false;

  for line in log.lines() {
    saw_line = true;
    let line = line.trim();
    match current.take() {
      None => {
        if patterns.section_start.is_match(line) {
          let repository = extract_repository_name(line, patterns)?;
          current = Some(RawSection {
            repository,
            lines: Vec::new(),
          });
        }
      }
      Some(mut section) => {
        if patterns.section_end.is_match(line) {
          seal(&mut sections, section);
        } else {
          section.lines.push(line.to_string());
          current = Some(section);
        }
      }
    }
  }

  if !saw_line {
    return Err(EngineError::EmptyLog);
  }
  if let Some(section) = current {
    return Err(EngineError::UnterminatedSection {
      repository: section.repository,
    });
  }

  if sections.is_empty() {
    warn!("no branches information sections found in the log");
  } else {
    info!("{} branches information sections found", sections.len());
  }
  Ok(sections)
}

/// Pull the repository identifier (first capture group) from a start line.
fn extract_repository_name(line: &str, patterns: &Patterns) -> Result<String, EngineError> {
  patterns
    .repository_name
    .captures(line)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str().to_string())
    .ok_or_else(|| EngineError::RepositoryName {
      line: line.to_string(),
    })
}

/// Append a sealed section, replacing an earlier body for the same repository
/// without disturbing its position.
fn seal(sections: &mut Vec<RawSection>, sealed: RawSection) {
  match sections.iter_mut().find(|s| s.repository == sealed.repository) {
    Some(existing) => existing.lines = sealed.lines,
    None => sections.push(sealed),
  }
}
