use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use tokenguard_types::RepoPath;
use walkdir::{DirEntry, WalkDir};

/// Extensions of files the parser understands.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts"];

/// Directory names never descended into.
pub const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "coverage",
    "out",
    "storybook-static",
];

/// Discover source files under `dir`, reported relative to `repo_root`.
///
/// Behavior:
/// - hidden directories and the [`SKIPPED_DIRS`] are not descended into
/// - story and test files are skipped
/// - `exclude` globs are matched against the repo-relative path
/// - output is sorted, so downstream order is stable regardless of traversal order
pub fn discover_sources(
    repo_root: &Utf8Path,
    dir: &Utf8Path,
    exclude: &[String],
) -> anyhow::Result<Vec<RepoPath>> {
    let exclude_set = build_globset(exclude).context("compile exclude globset")?;
    let start = repo_root.join(dir);

    let mut out: Vec<RepoPath> = WalkDir::new(&start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .map(|abs| relative_to(repo_root, &abs))
        .filter(|rel| is_source_path(rel) && !rel.is_story_or_test())
        .filter(|rel| !exclude_set.is_match(rel.as_str()))
        .collect();

    // Stable order.
    out.sort();
    out.dedup();

    Ok(out)
}

/// True for files with one of the [`SOURCE_EXTENSIONS`].
pub fn is_source_path(path: &RepoPath) -> bool {
    path.extension()
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.as_str()))
}

pub(crate) fn relative_to(repo_root: &Utf8Path, abs: &Utf8Path) -> RepoPath {
    let rel = abs.strip_prefix(repo_root).unwrap_or(abs);
    RepoPath::new(rel.as_str())
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p)?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn touch(root: &Utf8Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, "export {};\n").expect("write file");
    }

    fn discovered(root: &Utf8Path, dir: &str, exclude: &[String]) -> Vec<String> {
        discover_sources(root, Utf8Path::new(dir), exclude)
            .expect("discover")
            .into_iter()
            .map(|p| p.as_str().to_string())
            .collect()
    }

    #[test]
    fn discovers_source_extensions_only() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        for rel in [
            "src/a.tsx",
            "src/b.ts",
            "src/c.js",
            "src/d.jsx",
            "src/e.mjs",
            "src/f.cjs",
            "src/g.mts",
            "src/h.cts",
            "src/styles.css",
            "src/readme.md",
        ] {
            touch(&root, rel);
        }

        assert_eq!(
            discovered(&root, "src", &[]),
            vec![
                "src/a.tsx",
                "src/b.ts",
                "src/c.js",
                "src/d.jsx",
                "src/e.mjs",
                "src/f.cjs",
                "src/g.mts",
                "src/h.cts",
            ]
        );
    }

    #[test]
    fn skips_vendor_build_and_hidden_dirs() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        for rel in [
            "src/App.tsx",
            "src/node_modules/pkg/index.js",
            "src/dist/bundle.js",
            "src/build/out.js",
            "src/coverage/lcov.js",
            "src/out/x.js",
            "src/storybook-static/main.js",
            "src/.cache/y.ts",
        ] {
            touch(&root, rel);
        }

        assert_eq!(discovered(&root, "src", &[]), vec!["src/App.tsx"]);
    }

    #[test]
    fn skips_stories_and_tests() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        for rel in [
            "src/Card.tsx",
            "src/Card.stories.tsx",
            "src/Card.test.tsx",
            "src/Card.spec.ts",
        ] {
            touch(&root, rel);
        }

        assert_eq!(discovered(&root, "src", &[]), vec!["src/Card.tsx"]);
    }

    #[test]
    fn applies_exclude_globs() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        touch(&root, "src/generated/icons.tsx");
        touch(&root, "src/Card.tsx");

        assert_eq!(
            discovered(&root, "src", &["src/generated/**".to_string()]),
            vec!["src/Card.tsx"]
        );
    }

    #[test]
    fn invalid_exclude_glob_returns_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        touch(&root, "src/Card.tsx");

        let err = discover_sources(&root, Utf8Path::new("src"), &["[".to_string()]).unwrap_err();
        assert!(err.to_string().contains("compile exclude globset"));
    }

    #[test]
    fn pathbuf_to_utf8_rejects_invalid() {
        #[cfg(windows)]
        {
            use std::ffi::OsString;
            use std::os::windows::ffi::OsStringExt;
            let invalid = OsString::from_wide(&[0xD800]);
            let path = PathBuf::from(invalid);
            assert!(pathbuf_to_utf8(path).is_none());
        }

        #[cfg(unix)]
        {
            use std::ffi::OsString;
            use std::os::unix::ffi::OsStringExt;
            let invalid = OsString::from_vec(vec![0xFF, 0xFE, 0xFD]);
            let path = PathBuf::from(invalid);
            assert!(pathbuf_to_utf8(path).is_none());
        }
    }
}
