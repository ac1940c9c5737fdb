//! Shared plumbing for the use cases: config resolution, loading and evaluation.

use anyhow::Context;
use camino::Utf8Path;
use rayon::prelude::*;
use tokenguard_domain::policy::EffectiveConfig;
use tokenguard_domain::report::DomainReport;
use tokenguard_domain::{Registries, evaluate_unit};
use tokenguard_repo::ParsedSources;
use tokenguard_settings::{Overrides, ResolvedConfig, TokenguardConfigV1};
use tokenguard_types::Finding;

/// Parse config (empty is allowed, defaults apply) and resolve it.
pub(crate) fn resolve(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        TokenguardConfigV1::default()
    } else {
        tokenguard_settings::parse_config_toml(config_text).context("parse config")?
    };
    tokenguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Discover and parse every source file under `targets`.
pub(crate) fn load(
    repo_root: &Utf8Path,
    targets: &[&Utf8Path],
    exclude: &[String],
) -> anyhow::Result<ParsedSources> {
    let sources = tokenguard_repo::load_sources(repo_root, targets, exclude)?;
    tracing::debug!(
        files = sources.files_scanned(),
        failures = sources.failures.len(),
        "loaded sources"
    );
    Ok(sources)
}

/// Evaluate each parsed file in parallel; findings keep file order.
pub(crate) fn evaluate(sources: &ParsedSources, cfg: &EffectiveConfig) -> DomainReport {
    let registries = Registries::standard();
    let findings: Vec<Finding> = sources
        .units
        .par_iter()
        .map(|unit| evaluate_unit(unit, cfg, &registries))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();
    DomainReport::new(findings, cfg.fail_on)
}
