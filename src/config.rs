//! Pattern configuration: the raw JSON record and the compiled regex set.
//!
//! The config file carries every regex the engine matches against, plus a
//! shared timestamp-prefix fragment. The fragment is spliced into each pattern
//! wherever the placeholder token occurs, once, at load time; a compiled
//! `Patterns` never holds an unexpanded placeholder.

use regex::Regex;
use serde::Deserialize;

use crate::error::EngineError;

/// Raw pattern strings as they appear in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPatternConfig {
  pub branches_info_start_pattern: String,
  pub branches_info_end_pattern: String,
  pub repository_name_pattern: String,
  pub timestamp_base_pattern: String,
  pub timestamp_base_pattern_placeholder: String,
  pub timestamp_pattern: String,
  pub dry_run_info_pattern_general: String,
  pub dry_run_info_pattern_autoclosed: String,
  /// How many lines below the autoclosed marker the title line sits.
  /// 0 means the marker's immediate successor.
  pub dry_run_info_autoclosed_pr_title_line_number: usize,
  pub dry_run_info_autoclosed_pr_title_pattern: String,
  pub updated_branch_pattern: String,
  pub created_branch_pattern: String,
  pub commited_files_pattern: String,
}

impl RawPatternConfig {
  /// Decode the config file contents.
  pub fn from_json(text: &str) -> Result<Self, EngineError> {
    serde_json::from_str(text).map_err(|e| EngineError::config(format!("invalid JSON: {e}")))
  }
}

/// Compiled pattern set, owned by the pipeline for its lifetime.
#[derive(Debug)]
pub struct Patterns {
  pub section_start: Regex,
  pub section_end: Regex,
  pub repository_name: Regex,
  pub timestamp: Regex,
  pub dry_run_general: Regex,
  pub autoclosed_marker: Regex,
  pub autoclosed_title: Regex,
  pub autoclosed_title_offset: usize,
  pub updated_branch: Regex,
  pub created_branch: Regex,
  pub committed_files: Regex,
}

impl Patterns {
  /// Expand the timestamp placeholder in every pattern and compile the set.
  pub fn compile(raw: &RawPatternConfig) -> Result<Self, EngineError> {
    let expand = |pattern: &str| -> String {
      if raw.timestamp_base_pattern_placeholder.is_empty() {
        return pattern.to_string();
      }
      // Literal substitution, once per occurrence, not recursive.
      pattern.replace(
        &raw.timestamp_base_pattern_placeholder,
        &raw.timestamp_base_pattern,
      )
    };
    let compile = |name: &str, pattern: &str| -> Result<Regex, EngineError> {
      Regex::new(&expand(pattern)).map_err(|e| EngineError::pattern(name, e))
    };

    Ok(Self {
      section_start: compile("branches_info_start_pattern", &raw.branches_info_start_pattern)?,
      section_end: compile("branches_info_end_pattern", &raw.branches_info_end_pattern)?,
      repository_name: compile("repository_name_pattern", &raw.repository_name_pattern)?,
      timestamp: compile("timestamp_pattern", &raw.timestamp_pattern)?,
      dry_run_general: compile(
        "dry_run_info_pattern_general",
        &raw.dry_run_info_pattern_general,
      )?,
      autoclosed_marker: compile(
        "dry_run_info_pattern_autoclosed",
        &raw.dry_run_info_pattern_autoclosed,
      )?,
      autoclosed_title: compile(
        "dry_run_info_autoclosed_pr_title_pattern",
        &raw.dry_run_info_autoclosed_pr_title_pattern,
      )?,
      autoclosed_title_offset: raw.dry_run_info_autoclosed_pr_title_line_number,
      updated_branch: compile("updated_branch_pattern", &raw.updated_branch_pattern)?,
      created_branch: compile("created_branch_pattern", &raw.created_branch_pattern)?,
      committed_files: compile("commited_files_pattern", &raw.commited_files_pattern)?,
    })
  }

  /// Decode and compile in one step.
  pub fn from_json(text: &str) -> Result<Self, EngineError> {
    let raw = RawPatternConfig::from_json(text)?;
    Self::compile(&raw)
  }
}
