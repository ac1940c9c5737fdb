#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderableSeverity {
    Info,
    Minor,
    Major,
    Critical,
}

impl RenderableSeverity {
    pub fn label(self) -> &'static str {
        match self {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Minor => "MINOR",
            RenderableSeverity::Major => "MAJOR",
            RenderableSeverity::Critical => "CRITICAL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableConfidence {
    High,
    Medium,
    Low,
}

impl RenderableConfidence {
    pub fn label(self) -> &'static str {
        match self {
            RenderableConfidence::High => "HIGH",
            RenderableConfidence::Medium => "MEDIUM",
            RenderableConfidence::Low => "LOW",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableLocation {
    pub path: String,
    pub line: u32,
    pub col: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub confidence: RenderableConfidence,
    pub check_id: String,
    pub code: String,
    pub message: String,
    pub location: RenderableLocation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    /// What was scanned (a directory or a list of paths).
    pub scanned: String,
    pub findings_total: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub critical: u32,
    pub major: u32,
    pub minor: u32,
    pub info: u32,
}

/// One row of the per-class breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableClassRow {
    pub code: String,
    pub check_id: String,
    pub count: u32,
    pub severity: RenderableCounts,
    pub files: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableParseFailure {
    pub path: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableSummary {
    pub title: String,
    pub scanned: String,
    pub files_scanned: u32,
    pub findings_total: u32,
    pub severity: RenderableCounts,
    pub classes: Vec<RenderableClassRow>,
    pub parse_failures: Vec<RenderableParseFailure>,
}
