//! Render use cases: console, markdown and GitHub annotations from in-memory reports.

use tokenguard_render::{RenderableReport, RenderableSummary};

pub fn render_summary(summary: &RenderableSummary) -> String {
    tokenguard_render::render_summary(summary)
}

pub fn render_text(report: &RenderableReport) -> String {
    tokenguard_render::render_text(report)
}

pub fn render_markdown(report: &RenderableReport) -> String {
    tokenguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    tokenguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
