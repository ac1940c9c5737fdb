//! Integration tests for source discovery.
//!
//! These tests verify that discovery produces a stable, deterministic
//! ordering of source files regardless of filesystem traversal order.

use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use tokenguard_repo::{discover_sources, load_sources};

/// Get the path to the test fixtures directory (repo root / tests / fixtures).
fn fixtures_dir() -> Utf8PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/tokenguard-repo -> crates -> repo root
    let repo_root = manifest_dir
        .parent()
        .expect("tokenguard-repo should have parent (crates)")
        .parent()
        .expect("crates should have parent (repo root)");
    Utf8PathBuf::from_path_buf(repo_root.join("tests").join("fixtures"))
        .expect("fixture path should be valid UTF-8")
}

/// Golden snapshot test for discovered source ordering.
#[test]
fn source_ordering_is_deterministic() {
    let fixture_path = fixtures_dir().join("source_ordering");

    let sources =
        discover_sources(&fixture_path, Utf8Path::new("src"), &[]).expect("discovery should succeed");
    let actual: Vec<&str> = sources.iter().map(|p| p.as_str()).collect();

    let expected_path = fixture_path.join("expected.source_order.json");
    let expected_content =
        std::fs::read_to_string(&expected_path).expect("should read expected source order");
    let expected: Vec<String> =
        serde_json::from_str(&expected_content).expect("should parse expected source order");

    assert_eq!(
        actual, expected,
        "Source ordering should match golden snapshot.\n\
         Actual: {actual:?}\n\
         Expected: {expected:?}"
    );
}

/// Running discovery repeatedly yields identical results.
#[test]
fn source_discovery_is_idempotent() {
    let fixture_path = fixtures_dir().join("source_ordering");

    let run1 = discover_sources(&fixture_path, Utf8Path::new("src"), &[]).expect("first run");
    let run2 = discover_sources(&fixture_path, Utf8Path::new("src"), &[]).expect("second run");

    assert_eq!(run1, run2, "Discovery should produce identical results");
}

/// Parse failures are collected and the remaining files still parse.
#[test]
fn broken_files_do_not_abort_loading() {
    let fixture_path = fixtures_dir().join("consumer_app");

    let parsed = load_sources(&fixture_path, &[Utf8Path::new("src")], &[]).expect("load");
    let ok: Vec<&str> = parsed.units.iter().map(|u| u.path.as_str()).collect();
    let failed: Vec<&str> = parsed.failures.iter().map(|f| f.path.as_str()).collect();

    assert_eq!(ok, vec!["src/Card.tsx", "src/domain/Billing.tsx"]);
    assert_eq!(failed, vec!["src/Broken.tsx"]);
    assert_eq!(parsed.files_scanned(), 3);
}
