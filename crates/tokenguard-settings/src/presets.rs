use tokenguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use tokenguard_types::ids::{
    CHECK_CLOSED_SYSTEM, CHECK_TOKENS_COLOR, CHECK_TOKENS_MARGIN_SPACING, CHECK_TOKENS_RHYTHM,
};
use tokenguard_types::all_check_ids;

/// Known profile names.
pub const PROFILES: &[&str] = &["strict", "library", "audit"];

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "library" => library_profile(),
        "audit" => audit_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    with_checks("strict", all_check_ids())
}

/// Checks that apply inside the component library itself.
fn library_profile() -> EffectiveConfig {
    with_checks(
        "library",
        &[
            CHECK_TOKENS_MARGIN_SPACING,
            CHECK_TOKENS_COLOR,
            CHECK_TOKENS_RHYTHM,
        ],
    )
}

fn audit_profile() -> EffectiveConfig {
    with_checks("audit", &[CHECK_CLOSED_SYSTEM])
}

fn with_checks(profile: &str, enabled: &[&str]) -> EffectiveConfig {
    EffectiveConfig {
        profile: profile.to_string(),
        fail_on: FailOn::Never,
        checks: all_check_ids()
            .iter()
            .map(|id| {
                let policy = if enabled.contains(id) {
                    CheckPolicy::enabled()
                } else {
                    CheckPolicy::disabled()
                };
                (id.to_string(), policy)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_enables_everything() {
        let cfg = preset("strict");
        assert!(all_check_ids().iter().all(|id| cfg.is_enabled(id)));
    }

    #[test]
    fn library_skips_closed_system() {
        let cfg = preset("library");
        assert!(cfg.is_enabled(CHECK_TOKENS_COLOR));
        assert!(!cfg.is_enabled(CHECK_CLOSED_SYSTEM));
    }

    #[test]
    fn audit_runs_closed_system_only() {
        let cfg = preset("audit");
        assert!(cfg.is_enabled(CHECK_CLOSED_SYSTEM));
        assert!(!cfg.is_enabled(CHECK_TOKENS_MARGIN_SPACING));
        assert!(!cfg.is_enabled(CHECK_TOKENS_RHYTHM));
    }

    #[test]
    fn unknown_profile_is_strict() {
        assert_eq!(preset("relaxed"), preset("strict"));
    }
}
