use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical path used in findings and reports.
///
/// Normalization rules:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - relative to the scanned root when the caller can strip it
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoPath(String);

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath::new(".")
    }
}

impl RepoPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        if v.is_empty() {
            v = ".".to_string();
        }
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_utf8_pathbuf(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.0.clone())
    }

    /// Last path segment (`src/Card.tsx` -> `Card.tsx`).
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Lowercased extension of the last segment, if any.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name();
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// True when any `/`-separated segment equals `segment` exactly.
    pub fn has_segment(&self, segment: &str) -> bool {
        self.0.split('/').any(|s| s == segment)
    }

    /// Story and test files (`*.stories.*`, `*.story.*`, `*.test.*`, `*.spec.*`).
    pub fn is_story_or_test(&self) -> bool {
        let name = self.file_name();
        let mut parts = name.split('.');
        // The first part is the stem; the last is the extension.
        parts.next();
        let middle: Vec<&str> = parts.collect();
        if middle.len() < 2 {
            return false;
        }
        middle[..middle.len() - 1]
            .iter()
            .any(|p| matches!(*p, "stories" | "story" | "test" | "spec"))
    }
}

impl From<&Utf8Path> for RepoPath {
    fn from(value: &Utf8Path) -> Self {
        RepoPath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for RepoPath {
    fn from(value: Utf8PathBuf) -> Self {
        RepoPath::new(value.as_str())
    }
}

impl std::fmt::Display for RepoPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
