//! Pure policy evaluation (no IO).
//!
//! Input: parsed source units plus the effective configuration.
//! Output: findings, verdict, and the aggregated audit reports.

#![forbid(unsafe_code)]

pub mod checks;
pub mod policy;
pub mod registry;
pub mod report;
pub mod rule;
pub mod scope;

mod collector;
mod engine;
mod fingerprint;

pub use collector::FindingCollector;
pub use engine::{compute_verdict, evaluate, evaluate_unit, severity_counts};
pub use fingerprint::fingerprint_for_finding;
pub use registry::{ImportOrigin, Registries};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
