//! The `lint` use case: run every enabled rule over files and directories.

use crate::scan;
use camino::{Utf8Path, Utf8PathBuf};
use time::OffsetDateTime;
use tokenguard_domain::report::{ScanMeta, detailed};
use tokenguard_settings::{Overrides, ResolvedConfig};
use tokenguard_types::{DetailedReport, ParseFailure, Verdict};

/// Input for the lint use case.
#[derive(Clone, Debug)]
pub struct LintInput<'a> {
    /// Repository root; targets and reported paths are relative to it.
    pub repo_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Files or directories to lint. Empty means the configured default directory.
    pub targets: Vec<Utf8PathBuf>,
}

/// Output from the lint use case.
#[derive(Clone, Debug)]
pub struct LintOutput {
    pub report: DetailedReport,
    pub parse_failures: Vec<ParseFailure>,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the lint use case: resolve config, discover and parse sources, evaluate every enabled rule.
pub fn run_lint(input: LintInput<'_>) -> anyhow::Result<LintOutput> {
    let resolved = scan::resolve(input.config_text, input.overrides)?;

    let targets: Vec<Utf8PathBuf> = if input.targets.is_empty() {
        vec![Utf8PathBuf::from(&resolved.default_dir)]
    } else {
        input.targets
    };
    let target_refs: Vec<&Utf8Path> = targets.iter().map(|t| t.as_path()).collect();

    let sources = scan::load(input.repo_root, &target_refs, &resolved.exclude)?;
    let domain_report = scan::evaluate(&sources, &resolved.effective);

    let meta = ScanMeta {
        scanned: target_refs
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        files_scanned: sources.files_scanned() as u32,
        generated_at: OffsetDateTime::now_utc(),
    };

    Ok(LintOutput {
        report: detailed(&meta, &domain_report),
        parse_failures: sources.failures,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
