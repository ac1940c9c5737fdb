use anyhow::Context;
use serde::Serialize;
use tokenguard_render::{
    RenderableClassRow, RenderableConfidence, RenderableCounts, RenderableData,
    RenderableFinding, RenderableLocation, RenderableParseFailure, RenderableReport,
    RenderableSeverity, RenderableSummary, RenderableVerdictStatus,
};
use tokenguard_types::{
    AuditSummary, Confidence, DetailedReport, Finding, SCHEMA_AUDIT_FINDINGS_V1,
    SCHEMA_AUDIT_SUMMARY_V1, Severity, SeverityCounts, Verdict,
};

/// Parse a detailed findings report written by `audit` or `lint --format json`.
pub fn parse_report_json(text: &str) -> anyhow::Result<DetailedReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    match schema.as_str() {
        SCHEMA_AUDIT_FINDINGS_V1 => {
            serde_json::from_value(value).context("parse tokenguard findings report")
        }
        SCHEMA_AUDIT_SUMMARY_V1 => anyhow::bail!(
            "{SCHEMA_AUDIT_SUMMARY_V1} has no individual findings; pass the findings report instead"
        ),
        other => anyhow::bail!("unknown report schema: {other}"),
    }
}

/// Pretty JSON with a trailing newline.
pub fn serialize_json<T: Serialize>(value: &T) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(value).context("serialize report")?;
    data.push(b'\n');
    Ok(data)
}

pub fn to_renderable(report: &DetailedReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            scanned: report.scanned.clone(),
            findings_total: report.findings.len() as u32,
        },
    }
}

pub fn to_renderable_summary(summary: &AuditSummary, title: &str) -> RenderableSummary {
    RenderableSummary {
        title: title.to_string(),
        scanned: summary.scanned.clone(),
        files_scanned: summary.files_scanned,
        findings_total: summary.total_findings,
        severity: renderable_counts(&summary.severity),
        classes: summary
            .classes
            .iter()
            .map(|(code, class)| RenderableClassRow {
                code: code.clone(),
                check_id: class.check_id.clone(),
                count: class.count,
                severity: renderable_counts(&class.severity),
                files: class.files.len(),
            })
            .collect(),
        parse_failures: summary
            .parse_failures
            .iter()
            .map(|f| RenderableParseFailure {
                path: f.path.as_str().to_string(),
                message: f.message.clone(),
            })
            .collect(),
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Minor => RenderableSeverity::Minor,
            Severity::Major => RenderableSeverity::Major,
            Severity::Critical => RenderableSeverity::Critical,
        },
        confidence: match f.confidence {
            Confidence::High => RenderableConfidence::High,
            Confidence::Medium => RenderableConfidence::Medium,
            Confidence::Low => RenderableConfidence::Low,
        },
        check_id: f.check_id.clone(),
        code: f.violation_class.clone(),
        message: f.message.clone(),
        location: RenderableLocation {
            path: f.location.path.as_str().to_string(),
            line: f.location.line,
            col: f.location.col,
        },
    }
}

fn renderable_counts(counts: &SeverityCounts) -> RenderableCounts {
    RenderableCounts {
        critical: counts.critical,
        major: counts.major,
        minor: counts.minor,
        info: counts.info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use time::OffsetDateTime;
    use tokenguard_types::{ClassSummary, ConfidenceCounts, Location, ParseFailure, RepoPath, ToolMeta};

    fn finding() -> Finding {
        Finding {
            check_id: "closed_system".to_string(),
            violation_class: "v2_inline_style".to_string(),
            severity: Severity::Critical,
            confidence: Confidence::High,
            message: "V2: inline style passed to regulated component Text".to_string(),
            location: Location {
                path: RepoPath::new("src/Card.tsx"),
                line: 4,
                col: 9,
            },
            fingerprint: None,
            data: json!({ "component": "Text" }),
        }
    }

    fn detailed_report() -> DetailedReport {
        DetailedReport {
            schema: SCHEMA_AUDIT_FINDINGS_V1.to_string(),
            tool: ToolMeta::current(),
            generated_at: OffsetDateTime::UNIX_EPOCH,
            scanned: "src".to_string(),
            verdict: Verdict::Warn,
            findings: vec![finding()],
        }
    }

    #[test]
    fn parses_serialized_findings_report() {
        let report = detailed_report();
        let bytes = serialize_json(&report).expect("serialize");
        assert_eq!(bytes.last(), Some(&b'\n'));
        let text = String::from_utf8(bytes).expect("utf8");
        let back = parse_report_json(&text).expect("parse");
        assert_eq!(back, report);
    }

    #[test]
    fn rejects_summary_and_unknown_schemas() {
        let err = parse_report_json(r#"{"schema": "tokenguard.audit.summary.v1"}"#).unwrap_err();
        assert!(err.to_string().contains("no individual findings"));

        let err = parse_report_json(r#"{"schema": "other.v1"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema"));

        assert!(parse_report_json("not json").is_err());
    }

    #[test]
    fn maps_findings_to_renderables() {
        let renderable = to_renderable(&detailed_report());
        assert_eq!(renderable.verdict, RenderableVerdictStatus::Warn);
        assert_eq!(renderable.data.findings_total, 1);
        let f = &renderable.findings[0];
        assert_eq!(f.severity, RenderableSeverity::Critical);
        assert_eq!(f.code, "v2_inline_style");
        assert_eq!((f.location.line, f.location.col), (4, 9));
    }

    #[test]
    fn maps_summary_rows_in_class_order() {
        let mut classes = BTreeMap::new();
        classes.insert(
            "v2_inline_style".to_string(),
            ClassSummary {
                check_id: "closed_system".to_string(),
                count: 2,
                severity: SeverityCounts {
                    critical: 2,
                    ..SeverityCounts::default()
                },
                confidence: ConfidenceCounts::default(),
                files: vec![RepoPath::new("src/a.tsx"), RepoPath::new("src/b.tsx")],
            },
        );
        let summary = AuditSummary {
            schema: SCHEMA_AUDIT_SUMMARY_V1.to_string(),
            tool: ToolMeta::current(),
            generated_at: OffsetDateTime::UNIX_EPOCH,
            scanned: "src".to_string(),
            files_scanned: 5,
            total_findings: 2,
            confidence: Some(Confidence::High),
            verdict: Verdict::Warn,
            severity: SeverityCounts {
                critical: 2,
                ..SeverityCounts::default()
            },
            classes,
            parse_failures: vec![ParseFailure {
                path: RepoPath::new("src/x.tsx"),
                message: "syntax error at 1:1".to_string(),
            }],
        };

        let rendered = to_renderable_summary(&summary, "Closed-system audit");
        assert_eq!(rendered.classes.len(), 1);
        assert_eq!(rendered.classes[0].files, 2);
        assert_eq!(rendered.severity.critical, 2);
        assert_eq!(rendered.parse_failures[0].path, "src/x.tsx");
    }
}
