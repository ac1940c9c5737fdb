//! Use case orchestration for tokenguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod audit;
mod explain;
mod lint;
mod render;
mod report;
mod scan;

pub use audit::{ArtifactNames, AuditInput, AuditOutput, artifact_names, run_audit};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use lint::{LintInput, LintOutput, run_lint, verdict_exit_code};
pub use render::{render_annotations, render_markdown, render_summary, render_text};
pub use report::{parse_report_json, serialize_json, to_renderable, to_renderable_summary};
