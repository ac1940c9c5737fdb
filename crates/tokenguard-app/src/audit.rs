//! The `audit` use case: closed-system rules over a directory tree, written as two artifacts.

use crate::report::serialize_json;
use crate::scan;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use time::OffsetDateTime;
use tokenguard_domain::policy::EffectiveConfig;
use tokenguard_domain::report::{ScanMeta, detailed, summarize};
use tokenguard_settings::Overrides;
use tokenguard_types::{AuditSummary, DetailedReport, ids};

/// Input for the audit use case.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Repository root; the directory and reported paths are relative to it.
    pub repo_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Directory to audit. `None` means the configured default (`src`).
    pub dir: Option<Utf8PathBuf>,
}

/// Output from the audit use case.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub summary: AuditSummary,
    pub detailed: DetailedReport,
    /// Where the summary artifact was written.
    pub summary_path: Utf8PathBuf,
    /// Where the findings artifact was written.
    pub findings_path: Utf8PathBuf,
}

/// File names of the two audit artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactNames {
    pub summary: &'static str,
    pub findings: &'static str,
}

/// Audits of a `domain` directory get their own artifact names so both can live side by side.
pub fn artifact_names(dir: &Utf8Path) -> ArtifactNames {
    if dir.components().any(|c| c.as_str() == "domain") {
        ArtifactNames {
            summary: "domain-closed-system-summary.json",
            findings: "domain-closed-system-findings.json",
        }
    } else {
        ArtifactNames {
            summary: "closed-system-audit-summary.json",
            findings: "closed-system-audit-findings.json",
        }
    }
}

/// Run the audit use case: validate the directory, run V1-V5, write both artifacts.
///
/// Only an invalid directory is an error; parse failures and findings are reported.
pub fn run_audit(input: AuditInput<'_>) -> anyhow::Result<AuditOutput> {
    let resolved = scan::resolve(input.config_text, input.overrides)?;

    let dir = input
        .dir
        .unwrap_or_else(|| Utf8PathBuf::from(&resolved.default_dir));
    let abs = input.repo_root.join(&dir);
    if !abs.exists() {
        anyhow::bail!("directory does not exist: {dir}");
    }
    if !abs.is_dir() {
        anyhow::bail!("not a directory: {dir}");
    }

    let effective = EffectiveConfig {
        profile: "audit".to_string(),
        fail_on: resolved.effective.fail_on,
        ..EffectiveConfig::only(&[ids::CHECK_CLOSED_SYSTEM])
    };

    let sources = scan::load(input.repo_root, &[dir.as_path()], &resolved.exclude)?;
    let domain_report = scan::evaluate(&sources, &effective);

    let meta = ScanMeta {
        scanned: dir.as_str().to_string(),
        files_scanned: sources.files_scanned() as u32,
        generated_at: OffsetDateTime::now_utc(),
    };
    let detailed = detailed(&meta, &domain_report);
    let summary = summarize(&meta, &domain_report, sources.failures);

    let reports_dir = input.repo_root.join(&resolved.reports_dir);
    let names = artifact_names(&dir);
    let summary_path = reports_dir.join(names.summary);
    let findings_path = reports_dir.join(names.findings);

    write_artifact(&summary_path, &serialize_json(&summary)?)?;
    write_artifact(&findings_path, &serialize_json(&detailed)?)?;

    Ok(AuditOutput {
        summary,
        detailed,
        summary_path,
        findings_path,
    })
}

fn write_artifact(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    tracing::info!(path = %path, bytes = data.len(), "wrote audit artifact");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenguard_types::Verdict;

    fn write(root: &Utf8Path, rel: &str, text: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, text).expect("write file");
    }

    fn input<'a>(root: &'a Utf8Path, config_text: &'a str, dir: Option<&str>) -> AuditInput<'a> {
        AuditInput {
            repo_root: root,
            config_text,
            overrides: Overrides::default(),
            dir: dir.map(Utf8PathBuf::from),
        }
    }

    const CARD: &str = r#"import { Text } from '@northstar/ui';

export const Card = ({ rest }) => (
  <Text className="mt-2" typographyRole="body" color="muted" {...rest}>
    Hi
  </Text>
);
"#;

    #[test]
    fn names_follow_the_domain_segment() {
        assert_eq!(
            artifact_names(Utf8Path::new("src")).summary,
            "closed-system-audit-summary.json"
        );
        assert_eq!(
            artifact_names(Utf8Path::new("src/domain")).findings,
            "domain-closed-system-findings.json"
        );
        assert_eq!(
            artifact_names(Utf8Path::new("src/domains")).findings,
            "closed-system-audit-findings.json"
        );
    }

    #[test]
    fn runs_closed_system_only_and_writes_artifacts() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        write(root, "src/Card.tsx", CARD);

        let output = run_audit(input(root, "", None)).expect("run_audit");

        assert!(
            output
                .detailed
                .findings
                .iter()
                .all(|f| f.check_id == ids::CHECK_CLOSED_SYSTEM)
        );
        assert_eq!(output.summary.total_findings, 2);
        assert_eq!(output.summary.files_scanned, 1);
        assert_eq!(output.summary.verdict, Verdict::Warn);
        assert_eq!(
            output.summary_path,
            root.join("reports/closed-system-audit-summary.json")
        );
        assert!(output.summary_path.is_file());
        assert!(output.findings_path.is_file());

        let text = std::fs::read_to_string(&output.findings_path).expect("read findings");
        let back: DetailedReport = serde_json::from_str(&text).expect("parse findings");
        assert_eq!(back, output.detailed);
    }

    #[test]
    fn honours_reports_dir_and_domain_naming() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        write(root, "src/domain/Card.tsx", CARD);

        let output = run_audit(input(root, "reports_dir = \"out\"\n", Some("src/domain")))
            .expect("run_audit");
        assert_eq!(
            output.findings_path,
            root.join("out/domain-closed-system-findings.json")
        );
        assert_eq!(output.summary.scanned, "src/domain");
    }

    #[test]
    fn invalid_directory_is_an_error() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        write(root, "src/Card.tsx", CARD);

        let missing = run_audit(input(root, "", Some("nope"))).unwrap_err();
        assert!(missing.to_string().contains("does not exist"));

        let file = run_audit(input(root, "", Some("src/Card.tsx"))).unwrap_err();
        assert!(file.to_string().contains("not a directory"));
    }

    #[test]
    fn fail_on_turns_findings_into_failure() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        write(root, "src/Card.tsx", CARD);

        let output = run_audit(input(root, "fail_on = \"critical\"\n", None)).expect("run_audit");
        assert_eq!(output.summary.verdict, Verdict::Fail);
    }
}
