//! Maps rule reports onto findings.

use crate::fingerprint::fingerprint_for_finding;
use crate::rule::Reporter;
use serde_json::Value;
use tokenguard_syntax::SyntaxNode;
use tokenguard_types::{Confidence, Finding, Location, RepoPath, lookup_class, render_template};

/// Collects the findings of one file, in report order.
#[derive(Debug)]
pub struct FindingCollector {
    path: RepoPath,
    findings: Vec<Finding>,
}

impl FindingCollector {
    pub fn new(path: RepoPath) -> Self {
        Self {
            path,
            findings: Vec::new(),
        }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

impl Reporter for FindingCollector {
    fn report(
        &mut self,
        node: &SyntaxNode,
        class: &'static str,
        data: Value,
        confidence: Confidence,
    ) {
        let Some(spec) = lookup_class(class) else {
            debug_assert!(false, "violation class {class} has no catalog entry");
            return;
        };

        let line = node.span.line;
        let col = node.span.col;
        self.findings.push(Finding {
            check_id: spec.check_id.to_string(),
            violation_class: spec.class.to_string(),
            severity: spec.severity,
            confidence,
            message: render_template(spec.template, &data),
            location: Location {
                path: self.path.clone(),
                line,
                col,
            },
            fingerprint: Some(fingerprint_for_finding(
                spec.check_id,
                spec.class,
                self.path.as_str(),
                line,
                col,
            )),
            data,
        });
    }
}
