use crate::{RenderableCounts, RenderableReport, RenderableSummary};

/// Human summary of an audit: totals, severity breakdown, one line per class.
pub fn render_summary(summary: &RenderableSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: {}\n", summary.title, summary.scanned));
    out.push_str(&format!("Files scanned: {}\n", summary.files_scanned));
    out.push_str(&format!("Total findings: {}\n", summary.findings_total));

    if summary.findings_total > 0 {
        out.push_str(&format!("Severity: {}\n", counts_line(&summary.severity)));
        out.push_str("\nBy class:\n");
        for row in &summary.classes {
            out.push_str(&format!(
                "  {} [{}]: {} in {} file(s) ({})\n",
                row.code,
                row.check_id,
                row.count,
                row.files,
                counts_line(&row.severity)
            ));
        }
    } else {
        out.push_str("No findings.\n");
    }

    if !summary.parse_failures.is_empty() {
        out.push_str(&format!(
            "\nSkipped {} file(s) that failed to parse:\n",
            summary.parse_failures.len()
        ));
        for failure in &summary.parse_failures {
            out.push_str(&format!("  {}: {}\n", failure.path, failure.message));
        }
    }

    out
}

/// One line per finding, compiler style: `path:line:col: SEVERITY [check/code] message (CONFIDENCE)`.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    for f in &report.findings {
        out.push_str(&format!(
            "{}:{}:{}: {} [{}/{}] {} ({})\n",
            f.location.path,
            f.location.line,
            f.location.col,
            f.severity.label(),
            f.check_id,
            f.code,
            f.message,
            f.confidence.label()
        ));
    }

    let count = report.findings.len();
    out.push_str(&format!(
        "{} finding{} in {}\n",
        count,
        if count == 1 { "" } else { "s" },
        report.data.scanned
    ));

    out
}

/// Non-zero severity buckets, most severe first; `none` when all are zero.
fn counts_line(counts: &RenderableCounts) -> String {
    let parts: Vec<String> = [
        ("CRITICAL", counts.critical),
        ("MAJOR", counts.major),
        ("MINOR", counts.minor),
        ("INFO", counts.info),
    ]
    .iter()
    .filter(|(_, n)| *n > 0)
    .map(|(label, n)| format!("{label} {n}"))
    .collect();

    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        RenderableClassRow, RenderableConfidence, RenderableData, RenderableFinding,
        RenderableLocation, RenderableParseFailure, RenderableSeverity, RenderableVerdictStatus,
    };

    fn summary() -> RenderableSummary {
        RenderableSummary {
            title: "Closed-system audit".to_string(),
            scanned: "src".to_string(),
            files_scanned: 3,
            findings_total: 3,
            severity: RenderableCounts {
                critical: 2,
                major: 1,
                minor: 0,
                info: 0,
            },
            classes: vec![
                RenderableClassRow {
                    code: "v1_class_name".to_string(),
                    check_id: "closed_system".to_string(),
                    count: 2,
                    severity: RenderableCounts {
                        critical: 2,
                        ..RenderableCounts::default()
                    },
                    files: 2,
                },
                RenderableClassRow {
                    code: "v5_untyped_spread".to_string(),
                    check_id: "closed_system".to_string(),
                    count: 1,
                    severity: RenderableCounts {
                        major: 1,
                        ..RenderableCounts::default()
                    },
                    files: 1,
                },
            ],
            parse_failures: vec![RenderableParseFailure {
                path: "src/Broken.tsx".to_string(),
                message: "syntax error at 1:30".to_string(),
            }],
        }
    }

    #[test]
    fn renders_summary() {
        insta::assert_snapshot!(render_summary(&summary()), @r"
        Closed-system audit: src
        Files scanned: 3
        Total findings: 3
        Severity: CRITICAL 2, MAJOR 1

        By class:
          v1_class_name [closed_system]: 2 in 2 file(s) (CRITICAL 2)
          v5_untyped_spread [closed_system]: 1 in 1 file(s) (MAJOR 1)

        Skipped 1 file(s) that failed to parse:
          src/Broken.tsx: syntax error at 1:30
        ");
    }

    #[test]
    fn renders_empty_summary() {
        let empty = RenderableSummary {
            findings_total: 0,
            severity: RenderableCounts::default(),
            classes: Vec::new(),
            parse_failures: Vec::new(),
            ..summary()
        };
        let out = render_summary(&empty);
        assert!(out.contains("Total findings: 0"));
        assert!(out.contains("No findings."));
        assert!(!out.contains("By class"));
        assert!(!out.contains("Skipped"));
    }

    #[test]
    fn renders_text_lines() {
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Warn,
            findings: vec![RenderableFinding {
                severity: RenderableSeverity::Major,
                confidence: RenderableConfidence::High,
                check_id: "tokens.margin_spacing".to_string(),
                code: "margin_spacing".to_string(),
                message: "Text must not carry vertical margin (mt-2)".to_string(),
                location: RenderableLocation {
                    path: "src/Card.tsx".to_string(),
                    line: 4,
                    col: 11,
                },
            }],
            data: RenderableData {
                scanned: "src".to_string(),
                findings_total: 1,
            },
        };
        insta::assert_snapshot!(render_text(&report), @r"
        src/Card.tsx:4:11: MAJOR [tokens.margin_spacing/margin_spacing] Text must not carry vertical margin (mt-2) (HIGH)
        1 finding in src
        ");
    }
}
