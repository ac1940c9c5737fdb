//! Rendering utilities for the console and CI surfaces (Markdown, GitHub annotations).
//!
//! Renderers take their own flat models so they stay independent of the report DTOs.

#![forbid(unsafe_code)]

mod console;
mod gha;
mod markdown;
mod model;

pub use console::{render_summary, render_text};
pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableClassRow, RenderableConfidence, RenderableCounts, RenderableData,
    RenderableFinding, RenderableLocation, RenderableParseFailure, RenderableReport,
    RenderableSeverity, RenderableSummary, RenderableVerdictStatus,
};
