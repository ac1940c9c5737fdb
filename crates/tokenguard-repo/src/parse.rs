use camino::Utf8Path;
use rayon::prelude::*;
use tokenguard_syntax::{SourceUnit, parse_source};
use tokenguard_types::{ParseFailure, RepoPath};

/// Parsed files plus the ones that could not be read or parsed.
#[derive(Clone, Debug, Default)]
pub struct ParsedSources {
    pub units: Vec<SourceUnit>,
    pub failures: Vec<ParseFailure>,
}

impl ParsedSources {
    /// Files attempted, including failures.
    pub fn files_scanned(&self) -> usize {
        self.units.len() + self.failures.len()
    }
}

/// Reads and parses `paths` in parallel.
///
/// Results keep the order of `paths`. A file that cannot be read or parsed is
/// logged and recorded as a [`ParseFailure`]; it never aborts the run.
pub fn parse_sources(repo_root: &Utf8Path, paths: &[RepoPath]) -> ParsedSources {
    let results: Vec<Result<SourceUnit, ParseFailure>> = paths
        .par_iter()
        .map(|path| parse_one(repo_root, path))
        .collect();

    let mut parsed = ParsedSources::default();
    for result in results {
        match result {
            Ok(unit) => parsed.units.push(unit),
            Err(failure) => parsed.failures.push(failure),
        }
    }
    tracing::debug!(
        parsed = parsed.units.len(),
        failed = parsed.failures.len(),
        "parsed source files"
    );
    parsed
}

fn parse_one(repo_root: &Utf8Path, path: &RepoPath) -> Result<SourceUnit, ParseFailure> {
    let abs = repo_root.join(path.as_str());
    let text = std::fs::read_to_string(&abs).map_err(|err| {
        tracing::warn!(path = %path.as_str(), error = %err, "failed to read source file");
        ParseFailure {
            path: path.clone(),
            message: format!("read {abs}: {err}"),
        }
    })?;
    parse_source(path, &text).map_err(|err| {
        tracing::warn!(path = %path.as_str(), error = %err, "failed to parse source file");
        ParseFailure {
            path: path.clone(),
            message: err.to_string(),
        }
    })
}
