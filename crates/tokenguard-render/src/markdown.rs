use crate::{RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Tokenguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Scanned: `{}`\n- Findings: {}\n\n",
        verdict, report.data.scanned, report.data.findings_total
    ));

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    out.push_str("| Severity | Confidence | Check | Class | Location | Message |\n");
    out.push_str("|---|---|---|---|---|---|\n");

    for f in &report.findings {
        out.push_str(&format!(
            "| {} | {} | `{}` | `{}` | `{}:{}:{}` | {} |\n",
            f.severity.label(),
            f.confidence.label(),
            f.check_id,
            f.code,
            f.location.path,
            f.location.line,
            f.location.col,
            escape_cell(&f.message)
        ));
    }

    out
}

/// Keeps a message inside its table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
