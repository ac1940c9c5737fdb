//! Repository adapters: discover source files, read and parse them.
//!
//! This crate is allowed to do filesystem IO. It should not spawn external processes.
//! Paths in its output are relative to the repo root the caller supplies.

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use camino::Utf8Path;
use tokenguard_types::RepoPath;

pub use discover::{SKIPPED_DIRS, SOURCE_EXTENSIONS, discover_sources, is_source_path};
pub use parse::{ParsedSources, parse_sources};

/// Expand lint/audit targets into a sorted list of source files.
///
/// A directory target is walked with [`discover_sources`]. A file target is
/// taken as-is when it has a source extension, even if discovery would skip it.
/// A target that does not exist is an error.
pub fn collect_targets(
    repo_root: &Utf8Path,
    targets: &[&Utf8Path],
    exclude: &[String],
) -> anyhow::Result<Vec<RepoPath>> {
    let mut out = Vec::new();
    for target in targets {
        let abs = repo_root.join(target);
        if abs.is_dir() {
            out.extend(
                discover_sources(repo_root, target, exclude)
                    .with_context(|| format!("discover sources under {target}"))?,
            );
        } else if abs.is_file() {
            let rel = discover::relative_to(repo_root, &abs);
            if is_source_path(&rel) {
                out.push(rel);
            }
        } else {
            anyhow::bail!("path does not exist: {target}");
        }
    }
    out.sort();
    out.dedup();
    tracing::debug!(files = out.len(), "discovered source files");
    Ok(out)
}

/// Discover and parse every source file under `targets`.
pub fn load_sources(
    repo_root: &Utf8Path,
    targets: &[&Utf8Path],
    exclude: &[String],
) -> anyhow::Result<ParsedSources> {
    let paths = collect_targets(repo_root, targets, exclude)?;
    Ok(parse_sources(repo_root, &paths))
}
