use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `tokenguard.toml` schema v1.
///
/// This is a *user-facing* config model: every field is optional and unknown
/// profiles fall back to `strict`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TokenguardConfigV1 {
    /// Optional schema string for tooling (`tokenguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (all checks), `library` (token checks) or `audit` (closed system only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Lowest severity that fails the run: `never` (default), `critical`, `major`, `minor`, `info`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// Where `audit` writes its reports. Defaults to `reports`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<String>,

    /// Directory `audit` scans when none is given. Defaults to `src`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_dir: Option<String>,

    /// Repo-relative globs excluded from discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfig {
    /// Override the profile's enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}
