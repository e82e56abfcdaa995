//! Structured error types for the report engine.
//!
//! Every variant is fatal: the pipeline aborts at the point of detection and
//! never produces a partial report.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("config: {0}")]
  Config(String),

  #[error("pattern {name}: {source}")]
  Pattern {
    name: String,
    source: regex::Error,
  },

  #[error("log file is empty")]
  EmptyLog,

  #[error("repository name could not be extracted from section start line: {line}")]
  RepositoryName { line: String },

  #[error("start of the branches section for repository {repository} was found but no end was found")]
  UnterminatedSection { repository: String },

  #[error("pr title expected {offset} lines below the autoclosed marker, but the log ended first")]
  AutoclosedOffsetMissing { offset: usize },

  #[error("pr title expected {offset} lines below the autoclosed marker; found instead: {line}")]
  AutoclosedTitleNotFound { offset: usize, line: String },

  #[error("section body for repository {repository} is not valid JSON: {source}")]
  SectionBodyParse {
    repository: String,
    source: serde_json::Error,
  },

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl EngineError {
  pub fn config(msg: impl Into<String>) -> Self {
    Self::Config(msg.into())
  }

  pub fn pattern(name: &str, source: regex::Error) -> Self {
    Self::Pattern {
      name: name.to_string(),
      source,
    }
  }
}
