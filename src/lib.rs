//! Renovate dry-run report engine — deterministic log mining (no side effects).
//!
//! Recovers structured branch data from a Renovate dry-run job log (DEBUG
//! level), classifies every candidate PR into a normalized state, and renders
//! an HTML report of what Renovate would have done.
//!
//! Three independent linear scans over the log (sections, DRY-RUN info lines,
//! autoclose markers) feed a decoder and a classifier; any malformed input
//! aborts the whole run with a typed error, never a partial report.

pub mod autoclosed;
pub mod classify;
pub mod config;
pub mod decode;
pub mod dryrun;
pub mod error;
pub mod html;
pub mod report;
pub mod sections;

pub use classify::{Classification, PrState, ResultCode};
pub use config::{Patterns, RawPatternConfig};
pub use dryrun::DryRunIndex;
pub use error::EngineError;
pub use report::{analyze_log, build_report, Report};
