use std::collections::BTreeMap;
use tokenguard_types::{Severity, all_check_ids};

/// Lowest severity that turns the verdict into `fail`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailOn {
    #[default]
    Never,
    Critical,
    Major,
    Minor,
    Info,
}

impl FailOn {
    pub fn threshold(self) -> Option<Severity> {
        match self {
            FailOn::Never => None,
            FailOn::Critical => Some(Severity::Critical),
            FailOn::Major => Some(Severity::Major),
            FailOn::Minor => Some(Severity::Minor),
            FailOn::Info => Some(Severity::Info),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "never" => Some(FailOn::Never),
            "critical" => Some(FailOn::Critical),
            "major" => Some(FailOn::Major),
            "minor" => Some(FailOn::Minor),
            "info" => Some(FailOn::Info),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckPolicy {
    pub enabled: bool,
}

impl CheckPolicy {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl Default for EffectiveConfig {
    /// Every check enabled; never fails.
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            fail_on: FailOn::Never,
            checks: all_check_ids()
                .iter()
                .map(|id| (id.to_string(), CheckPolicy::enabled()))
                .collect(),
        }
    }
}

impl EffectiveConfig {
    /// Only the given checks enabled.
    pub fn only(check_ids: &[&str]) -> Self {
        let mut cfg = Self::default();
        for (id, policy) in cfg.checks.iter_mut() {
            policy.enabled = check_ids.contains(&id.as_str());
        }
        cfg
    }

    pub fn is_enabled(&self, check_id: &str) -> bool {
        self.checks.get(check_id).is_some_and(|p| p.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenguard_types::ids;

    #[test]
    fn default_enables_everything() {
        let cfg = EffectiveConfig::default();
        for id in all_check_ids() {
            assert!(cfg.is_enabled(id));
        }
        assert_eq!(cfg.fail_on.threshold(), None);
    }

    #[test]
    fn only_narrows_checks() {
        let cfg = EffectiveConfig::only(&[ids::CHECK_CLOSED_SYSTEM]);
        assert!(cfg.is_enabled(ids::CHECK_CLOSED_SYSTEM));
        assert!(!cfg.is_enabled(ids::CHECK_TOKENS_COLOR));
        assert!(!cfg.is_enabled("unknown"));
    }

    #[test]
    fn fail_on_parses_case_insensitively() {
        assert_eq!(FailOn::parse("MAJOR"), Some(FailOn::Major));
        assert_eq!(FailOn::parse("never"), Some(FailOn::Never));
        assert_eq!(FailOn::parse("warning"), None);
    }
}
