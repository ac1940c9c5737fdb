use crate::engine::evaluate_unit;
use crate::policy::EffectiveConfig;
use crate::registry::Registries;
use serde_json::json;
use tokenguard_syntax::{SourceUnit, parse_source};
use tokenguard_types::{
    Confidence, Finding, Location, RepoPath, lookup_class, render_template,
};

pub fn parse(path: &str, text: &str) -> SourceUnit {
    parse_source(&RepoPath::new(path), text).expect("test source must parse")
}

/// Findings of the given checks over `text` parsed as `src/App.tsx`.
pub fn run_checks(check_ids: &[&str], text: &str) -> Vec<Finding> {
    run_checks_at(check_ids, "src/App.tsx", text)
}

pub fn run_checks_at(check_ids: &[&str], path: &str, text: &str) -> Vec<Finding> {
    let unit = parse(path, text);
    evaluate_unit(
        &unit,
        &EffectiveConfig::only(check_ids),
        &Registries::standard(),
    )
}

pub fn classes(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.violation_class.as_str()).collect()
}

/// A minimal finding of `class`, located at line 1 of `path`.
pub fn finding(class: &str, path: &str, confidence: Confidence) -> Finding {
    let spec = lookup_class(class).expect("known class");
    Finding {
        check_id: spec.check_id.to_string(),
        violation_class: spec.class.to_string(),
        severity: spec.severity,
        confidence,
        message: render_template(spec.template, &json!({})),
        location: Location {
            path: RepoPath::new(path),
            line: 1,
            col: 1,
        },
        fingerprint: None,
        data: json!({}),
    }
}
