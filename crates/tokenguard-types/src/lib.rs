//! Stable DTOs and IDs used across the tokenguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for findings and the emitted audit reports
//! - stable string IDs for checks and violation classes
//! - the violation class catalog (fixed severity + message template per class)
//! - canonical repo-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod catalog;
pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use catalog::{ClassSpec, all_check_ids, all_classes, lookup_class, render_template};
pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{
    AuditSummary, ClassSummary, Confidence, ConfidenceCounts, DetailedReport, Finding, Location,
    ParseFailure, SCHEMA_AUDIT_FINDINGS_V1, SCHEMA_AUDIT_SUMMARY_V1, Severity, SeverityCounts,
    ToolMeta, Verdict,
};
