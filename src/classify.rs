//! Map a branch's raw result code to a normalized PR state.
//!
//! Most codes map straight through a fixed table. Two codes ("done" and
//! "no-work") are ambiguous on their own and need the branch's DRY-RUN info
//! lines to drill down to the real outcome.

use serde::Serialize;

use crate::config::Patterns;
use crate::dryrun::DryRunIndex;

/// Separator the renderer understands as a line break in detail text.
pub const DETAIL_SEPARATOR: &str = "<br>";

const UNKNOWN_STATE_MARKER: &str = "Unknown PR state";

/// Normalized outcome for one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrState {
  Unchanged,
  Updated,
  New,
  Discarded,
  Skipped,
  Error,
  Pending,
  Automerged,
  Unknown,
}

impl PrState {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Unchanged => "UNCHANGED",
      Self::Updated => "UPDATED",
      Self::New => "NEW",
      Self::Discarded => "DISCARDED",
      Self::Skipped => "SKIPPED",
      Self::Error => "ERROR",
      Self::Pending => "PENDING",
      Self::Automerged => "AUTOMERGED",
      Self::Unknown => "UNKNOWN",
    }
  }
}

/// Raw result code as Renovate emits it, closed over the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCode {
  Discarded,
  Autoclosed,
  AlreadyExisted,
  NotScheduled,
  UpdateNotScheduled,
  PrLimitReached,
  CommitLimitReached,
  BranchLimitReached,
  PrEdited,
  Error,
  Pending,
  NeedsPrApproval,
  NeedsApproval,
  NoWork,
  Done,
  PrCreated,
  Rebase,
  Automerged,
  /// Anything outside the known vocabulary, original text preserved.
  Other(String),
}

impl ResultCode {
  pub fn parse(raw: &str) -> Self {
    match raw {
      "discarded" => Self::Discarded,
      "autoclosed" => Self::Autoclosed,
      "already-existed" => Self::AlreadyExisted,
      "not-scheduled" => Self::NotScheduled,
      "update-not-scheduled" => Self::UpdateNotScheduled,
      "pr-limit-reached" => Self::PrLimitReached,
      "commit-limit-reached" => Self::CommitLimitReached,
      "branch-limit-reached" => Self::BranchLimitReached,
      "pr-edited" => Self::PrEdited,
      "error" => Self::Error,
      "pending" => Self::Pending,
      "needs-pr-approval" => Self::NeedsPrApproval,
      "needs-approval" => Self::NeedsApproval,
      "no-work" => Self::NoWork,
      "done" => Self::Done,
      "pr-created" => Self::PrCreated,
      "rebase" => Self::Rebase,
      "automerged" => Self::Automerged,
      other => Self::Other(other.to_string()),
    }
  }
}

/// Classified outcome: the state plus optional explanatory text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
  pub state: PrState,
  pub detail: String,
}

impl Classification {
  fn new(state: PrState, detail: impl Into<String>) -> Self {
    Self {
      state,
      detail: detail.into(),
    }
  }
}

/// Classify one branch. `branch` is the key the DRY-RUN lines use for it
/// (Renovate's dry-run log names branches by PR title).
pub fn classify(
  code: &ResultCode,
  repository: &str,
  branch: &str,
  index: &DryRunIndex,
  patterns: &Patterns,
) -> Classification {
  let info_lines = index.events(repository, branch);

  match code {
    ResultCode::Discarded | ResultCode::Autoclosed => {
      Classification::new(PrState::Discarded, "PR would be discarded")
    }
    ResultCode::AlreadyExisted => Classification::new(
      PrState::Skipped,
      "There is a closed PR for this dependency update so Renovate skipped the recreation of the PR",
    ),
    ResultCode::NotScheduled | ResultCode::UpdateNotScheduled => {
      Classification::new(PrState::Skipped, "PR is not scheduled for this repository")
    }
    ResultCode::PrLimitReached => {
      Classification::new(PrState::Skipped, "PR limit reached for this repository")
    }
    ResultCode::CommitLimitReached => {
      Classification::new(PrState::Skipped, "Commit limit reached for this repository")
    }
    ResultCode::BranchLimitReached => {
      Classification::new(PrState::Skipped, "Branch limit reached for this repository")
    }
    ResultCode::PrEdited => Classification::new(
      PrState::Skipped,
      "PR has been manually edited so Renovate skipped any processing in order to not override any manual changes",
    ),
    ResultCode::Error => Classification::new(PrState::Error, join(&info_lines)),
    ResultCode::Pending | ResultCode::NeedsPrApproval | ResultCode::NeedsApproval => {
      Classification::new(PrState::Pending, join(&info_lines))
    }
    ResultCode::NoWork => no_work_drilldown(&info_lines, patterns),
    ResultCode::Done => done_drilldown(&info_lines, patterns),
    ResultCode::PrCreated => Classification::new(PrState::New, ""),
    ResultCode::Rebase => Classification::new(PrState::Unchanged, "PR would be rebased"),
    ResultCode::Automerged => Classification::new(PrState::Automerged, "PR would be automerged"),
    ResultCode::Other(_) => Classification::new(PrState::Unknown, unknown_detail(&info_lines)),
  }
}

/// Disambiguate "done": the branch finished, but what actually happened is
/// only visible in its DRY-RUN lines. Priority order matters; a line set
/// matching both "updated" and "created" resolves to UPDATED.
fn done_drilldown(info_lines: &[String], patterns: &Patterns) -> Classification {
  if info_lines.is_empty() {
    return Classification::new(PrState::Unchanged, "");
  }
  if info_lines.iter().any(|l| patterns.updated_branch.is_match(l)) {
    Classification::new(PrState::Updated, "")
  } else if info_lines.iter().any(|l| patterns.created_branch.is_match(l)) {
    Classification::new(PrState::New, "")
  } else if info_lines.iter().any(|l| patterns.committed_files.is_match(l)) {
    // Rebased but not changed.
    Classification::new(PrState::Unchanged, "")
  } else {
    Classification::new(PrState::Unknown, join(info_lines))
  }
}

/// Disambiguate "no-work": a committed-files line means a PR was produced
/// despite the no-work signal.
fn no_work_drilldown(info_lines: &[String], patterns: &Patterns) -> Classification {
  if info_lines.is_empty() {
    Classification::new(PrState::Unchanged, "")
  } else if info_lines.iter().any(|l| patterns.committed_files.is_match(l)) {
    Classification::new(PrState::New, "")
  } else {
    Classification::new(PrState::Unknown, join(info_lines))
  }
}

fn join(info_lines: &[String]) -> String {
  info_lines.join(DETAIL_SEPARATOR)
}

fn unknown_detail(info_lines: &[String]) -> String {
  if info_lines.is_empty() {
    UNKNOWN_STATE_MARKER.to_string()
  } else {
    format!("{UNKNOWN_STATE_MARKER}{DETAIL_SEPARATOR}{}", join(info_lines))
  }
}
