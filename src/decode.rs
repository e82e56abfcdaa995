//! Decode sealed sections into structured per-repository branch data.
//!
//! Section bodies are JSON fragments with a leading timestamp on every line.
//! Stripping the timestamps and wrapping the concatenation in braces yields
//! one JSON object per repository. Autoclosed branches never appear in a
//! section, so they are synthesized here as single-branch reports.

use serde::{Deserialize, Serialize};

use crate::autoclosed::AutoclosedRecord;
use crate::config::Patterns;
use crate::error::EngineError;
use crate::sections::RawSection;

/// Display placeholder for fields the log did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Result code assigned to synthesized autoclosed branches.
pub const AUTOCLOSED_RESULT: &str = "autoclosed";

/// One proposed dependency upgrade within a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
  #[serde(default)]
  pub package_name: Option<String>,
  #[serde(default)]
  pub current_version: Option<String>,
  #[serde(default)]
  pub new_version: Option<String>,
}

/// One branch entry as Renovate reports it. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchInfo {
  #[serde(default)]
  pub pr_title: Option<String>,
  #[serde(default)]
  pub branch_name: Option<String>,
  #[serde(default)]
  pub result: Option<String>,
  #[serde(default)]
  pub upgrades: Vec<Upgrade>,
}

/// Section body wire shape (the wrapped JSON object).
#[derive(Debug, Deserialize)]
struct SectionBody {
  #[serde(default, rename = "branchesInformation")]
  branches_information: Vec<BranchInfo>,
}

/// Decoded branch data for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReport {
  pub repository: String,
  pub branches: Vec<BranchInfo>,
}

/// Decode every sealed section, then append synthetic autoclosed reports.
///
/// Ordering is an observable contract: real sections first in extraction
/// order, then autoclosed reports in extraction order.
pub fn decode_sections(
  sections: &[RawSection],
  autoclosed: &[AutoclosedRecord],
  patterns: &Patterns,
) -> Result<Vec<RepositoryReport>, EngineError> {
  let mut reports = Vec::with_capacity(sections.len() + autoclosed.len());

  for section in sections {
    let mut joined = String::from("{");
    for line in &section.lines {
      joined.push_str(&patterns.timestamp.replace_all(line, ""));
    }
    joined.push('}');

    let body: SectionBody =
      serde_json::from_str(&joined).map_err(|e| EngineError::SectionBodyParse {
        repository: section.repository.clone(),
        source: e,
      })?;
    reports.push(RepositoryReport {
      repository: section.repository.clone(),
      branches: body.branches_information,
    });
  }

  for record in autoclosed {
    reports.push(RepositoryReport {
      repository: record
        .repository
        .clone()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
      branches: vec![BranchInfo {
        pr_title: Some(
          record
            .title
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        branch_name: None,
        result: Some(AUTOCLOSED_RESULT.to_string()),
        upgrades: Vec::new(),
      }],
    });
  }

  Ok(reports)
}
