use crate::{model::TokenguardConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use tokenguard_domain::policy::{EffectiveConfig, FailOn};
use tokenguard_types::all_check_ids;
use tokenguard_types::ids::CHECK_CLOSED_SYSTEM;

pub const DEFAULT_REPORTS_DIR: &str = "reports";
pub const DEFAULT_SCAN_DIR: &str = "src";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_on: Option<String>,
    pub reports_dir: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub reports_dir: String,
    pub default_dir: String,
    pub exclude: Vec<String>,
}

pub fn resolve_config(
    cfg: TokenguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        if !all_check_ids().contains(&check_id.as_str()) {
            anyhow::bail!(
                "unknown check id in config: {check_id} (expected one of {})",
                all_check_ids().join(", ")
            );
        }
        if let Some(enabled) = cc.enabled
            && let Some(entry) = effective.checks.get_mut(check_id)
        {
            entry.enabled = enabled;
        }
    }

    // the audit profile exists to run the closed-system rules
    if effective.profile == "audit"
        && let Some(entry) = effective.checks.get_mut(CHECK_CLOSED_SYSTEM)
    {
        entry.enabled = true;
    }

    if let Some(fail_on_s) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    validate_excludes(&cfg.exclude)?;

    Ok(ResolvedConfig {
        effective,
        reports_dir: overrides
            .reports_dir
            .or(cfg.reports_dir)
            .unwrap_or_else(|| DEFAULT_REPORTS_DIR.to_string()),
        default_dir: cfg
            .default_dir
            .unwrap_or_else(|| DEFAULT_SCAN_DIR.to_string()),
        exclude: cfg.exclude,
    })
}

fn validate_excludes(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid exclude glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    FailOn::parse(v).with_context(|| {
        format!("unknown fail_on: {v} (expected never|critical|major|minor|info)")
    })
}
