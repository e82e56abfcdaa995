//! Index of DRY-RUN info lines scattered through the log.
//!
//! Every matching line yields one event; any of the three named captures
//! (`repository_name`, `branch_name`, `info`) may be absent, either because
//! the pattern omits the group or because it did not participate in the
//! match. Lookups only ever return events that carry an info text.

use tracing::info;

use crate::config::Patterns;

/// One matched DRY-RUN log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunEvent {
  pub repository: Option<String>,
  pub branch: Option<String>,
  pub info: Option<String>,
}

/// All DRY-RUN events in encounter order, with (repository, branch) lookup.
#[derive(Debug, Default)]
pub struct DryRunIndex {
  events: Vec<DryRunEvent>,
}

impl DryRunIndex {
  /// Single linear scan over the log.
  pub fn scan(log: &str, patterns: &Patterns) -> Self {
    let mut events = Vec::new();
    for line in log.lines() {
      let line = line.trim();
      if let Some(caps) = patterns.dry_run_general.captures(line) {
        events.push(DryRunEvent {
          repository: caps.name("repository_name").map(|m| m.as_str().to_string()),
          branch: caps.name("branch_name").map(|m| m.as_str().to_string()),
          info: caps.name("info").map(|m| m.as_str().to_string()),
        });
      }
    }
    info!("{} dry-run info lines found", events.len());
    Self { events }
  }

  /// All info texts recorded for this exact (repository, branch) key,
  /// in encounter order. Events without an info text never match.
  pub fn events(&self, repository: &str, branch: &str) -> Vec<String> {
    self
      .events
      .iter()
      .filter(|e| {
        e.repository.as_deref() == Some(repository)
          && e.branch.as_deref() == Some(branch)
          && e.info.is_some()
      })
      .filter_map(|e| e.info.clone())
      .collect()
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }
}
