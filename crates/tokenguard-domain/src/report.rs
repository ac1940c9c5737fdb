//! Aggregation of findings into the summary and detailed audit reports.

use crate::engine::{compute_verdict, severity_counts};
use crate::policy::FailOn;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tokenguard_types::{
    AuditSummary, ClassSummary, DetailedReport, Finding, ParseFailure, SCHEMA_AUDIT_FINDINGS_V1,
    SCHEMA_AUDIT_SUMMARY_V1, SeverityCounts, ToolMeta, Verdict,
};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub counts: SeverityCounts,
}

impl DomainReport {
    pub fn new(findings: Vec<Finding>, fail_on: FailOn) -> Self {
        Self {
            verdict: compute_verdict(&findings, fail_on),
            counts: severity_counts(&findings),
            findings,
        }
    }
}

/// What was scanned, for the report envelopes.
#[derive(Clone, Debug)]
pub struct ScanMeta {
    pub scanned: String,
    pub files_scanned: u32,
    pub generated_at: OffsetDateTime,
}

/// Groups findings by violation class. No finding is dropped or merged.
pub fn summarize(
    meta: &ScanMeta,
    report: &DomainReport,
    parse_failures: Vec<ParseFailure>,
) -> AuditSummary {
    let mut classes: BTreeMap<String, ClassSummary> = BTreeMap::new();
    for finding in &report.findings {
        let entry = classes
            .entry(finding.violation_class.clone())
            .or_insert_with(|| ClassSummary {
                check_id: finding.check_id.clone(),
                count: 0,
                severity: SeverityCounts::default(),
                confidence: Default::default(),
                files: Vec::new(),
            });
        entry.count += 1;
        entry.severity.add(finding.severity);
        entry.confidence.add(finding.confidence);
        if !entry.files.contains(&finding.location.path) {
            entry.files.push(finding.location.path.clone());
        }
    }

    AuditSummary {
        schema: SCHEMA_AUDIT_SUMMARY_V1.to_string(),
        tool: ToolMeta::current(),
        generated_at: meta.generated_at,
        scanned: meta.scanned.clone(),
        files_scanned: meta.files_scanned,
        total_findings: report.findings.len() as u32,
        confidence: report.findings.first().map(|f| f.confidence),
        verdict: report.verdict,
        severity: report.counts.clone(),
        classes,
        parse_failures,
    }
}

/// The flat finding list, in evaluation order.
pub fn detailed(meta: &ScanMeta, report: &DomainReport) -> DetailedReport {
    DetailedReport {
        schema: SCHEMA_AUDIT_FINDINGS_V1.to_string(),
        tool: ToolMeta::current(),
        generated_at: meta.generated_at,
        scanned: meta.scanned.clone(),
        verdict: report.verdict,
        findings: report.findings.clone(),
    }
}
