use crate::policy::EffectiveConfig;
use crate::rule::Rule;
use tokenguard_types::RepoPath;

mod closed_system;
mod color;
mod margin_spacing;
mod rhythm;
pub mod utils;

pub use closed_system::ClosedSystem;
pub use color::ColorPolicy;
pub use margin_spacing::{MarginSpacing, vertical_margin_classes};
pub use rhythm::Rhythm;


static RULES: [&dyn Rule; 4] = [&MarginSpacing, &ColorPolicy, &Rhythm, &ClosedSystem];

/// Every rule, regardless of configuration.
pub fn all_rules() -> &'static [&'static dyn Rule] {
    &RULES
}

/// Rules enabled by `cfg` that look at `path`.
pub fn enabled_rules(cfg: &EffectiveConfig, path: &RepoPath) -> Vec<&'static dyn Rule> {
    RULES
        .iter()
        .copied()
        .filter(|rule| cfg.is_enabled(rule.check_id()) && rule.applies_to(path))
        .collect()
}
