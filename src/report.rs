//! Assemble the engine's output: classified branch records per repository.
//!
//! This is the sole handoff surface to the renderer. Ordering mirrors the
//! decoder's: real sections first, synthetic autoclosed reports after.

use crate::autoclosed::extract_autoclosed;
use crate::classify::{classify, PrState, ResultCode};
use crate::config::Patterns;
use crate::decode::{decode_sections, RepositoryReport, Upgrade, NOT_AVAILABLE};
use crate::dryrun::DryRunIndex;
use crate::error::EngineError;
use crate::sections::extract_sections;

/// One classified branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
  pub title: Option<String>,
  pub branch_name: Option<String>,
  pub state: PrState,
  pub detail: String,
  pub upgrades: Vec<Upgrade>,
}

impl BranchRecord {
  /// First upgrade, rendered as the branch's own row.
  pub fn primary_upgrade(&self) -> Option<&Upgrade> {
    self.upgrades.first()
  }

  /// Remaining upgrades, rendered as auxiliary rows under the same branch.
  pub fn auxiliary_upgrades(&self) -> &[Upgrade] {
    if self.upgrades.is_empty() {
      &[]
    } else {
      &self.upgrades[1..]
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
  pub repository: String,
  pub branches: Vec<BranchRecord>,
}

/// Complete classified report, in decoder order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
  pub repositories: Vec<RepositoryRecord>,
}

/// Run the full pipeline over one log: the three independent scans, the
/// section decode, then classification.
pub fn analyze_log(log: &str, patterns: &Patterns) -> Result<Report, EngineError> {
  let index = DryRunIndex::scan(log, patterns);
  let autoclosed = extract_autoclosed(log, patterns)?;
  let sections = extract_sections(log, patterns)?;
  let decoded = decode_sections(&sections, &autoclosed, patterns)?;
  Ok(build_report(&decoded, &index, patterns))
}

/// Classify every branch of every decoded report.
pub fn build_report(
  reports: &[RepositoryReport],
  index: &DryRunIndex,
  patterns: &Patterns,
) -> Report {
  let repositories = reports
    .iter()
    .map(|report| RepositoryRecord {
      repository: report.repository.clone(),
      branches: report
        .branches
        .iter()
        .map(|branch| {
          let code = branch
            .result
            .as_deref()
            .map(ResultCode::parse)
            .unwrap_or_else(|| ResultCode::Other(String::new()));
          // Renovate's dry-run lines key branches by PR title.
          let branch_key = branch.pr_title.as_deref().unwrap_or(NOT_AVAILABLE);
          let classification = classify(&code, &report.repository, branch_key, index, patterns);
          BranchRecord {
            title: branch.pr_title.clone(),
            branch_name: branch.branch_name.clone(),
            state: classification.state,
            detail: classification.detail,
            upgrades: branch.upgrades.clone(),
          }
        })
        .collect(),
    })
    .collect();

  Report { repositories }
}
