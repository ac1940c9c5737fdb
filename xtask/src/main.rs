//! Developer tasks (schema generation, conformance checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use tokenguard_test_util::normalize_nondeterministic;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        match manifest_dir.parent() {
            Some(parent) => Ok(parent.to_path_buf()),
            None => bail!("xtask has no parent directory"),
        }
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_summary_schema() -> schemars::Schema {
    schema_for!(tokenguard_types::AuditSummary)
}

fn generate_findings_schema() -> schemars::Schema {
    schema_for!(tokenguard_types::DetailedReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(tokenguard_settings::TokenguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "tokenguard.audit.summary.v1.json",
            generate: generate_summary_schema,
        },
        SchemaSpec {
            filename: "tokenguard.audit.findings.v1.json",
            generate: generate_findings_schema,
        },
        SchemaSpec {
            filename: "tokenguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Checks that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Audit every fixture with the built binary and validate the reports");
    eprintln!("  explain-coverage  Validate all check IDs and violation classes have explanations");
}

/// Check that a path is clean: no absolute paths, no `../`, forward slashes only.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.contains("..")
        || path.contains('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

fn compile_schema(schema: &schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(schema).context("Failed to convert schema")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Runs the built binary over each fixture in tests/fixtures and checks:
/// 1. Both reports validate against the generated schemas
/// 2. Every finding path is repo-relative with forward slashes
/// 3. Findings match `expected.audit-findings.json` when the fixture has one
fn conform() -> anyhow::Result<()> {
    let root = project_root()?;
    let summary_schema = compile_schema(&generate_summary_schema())?;
    let findings_schema = compile_schema(&generate_findings_schema())?;

    let bin = root.join("target").join("debug").join("tokenguard");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "tokenguard binary not found at {}.\n\
            Run `cargo build -p tokenguard-cli` first.",
            bin.display()
        );
    }

    let fixtures_dir = root.join("tests").join("fixtures");
    let mut errors = Vec::new();
    let mut fixture_count = 0;

    for entry in fs::read_dir(&fixtures_dir).context("Failed to read tests/fixtures/")? {
        let fixture_dir = entry?.path();
        if !fixture_dir.join("src").is_dir() {
            continue;
        }
        let fixture_name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let output = std::process::Command::new(&bin)
            .arg("--repo-root")
            .arg(&fixture_dir)
            .args(["--fail-on", "never", "audit", "--reports-dir"])
            .arg(temp_dir.path())
            .output()
            .with_context(|| format!("Failed to run tokenguard on fixture '{}'", fixture_name))?;

        if !output.status.success() {
            errors.push(format!(
                "fixture '{}': tokenguard exited with {:?}: {}",
                fixture_name,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let summary = read_json(&temp_dir.path().join("closed-system-audit-summary.json"))?;
        let findings = read_json(&temp_dir.path().join("closed-system-audit-findings.json"))?;

        for err in summary_schema.iter_errors(&summary) {
            errors.push(format!("fixture '{}': summary schema: {}", fixture_name, err));
        }
        for err in findings_schema.iter_errors(&findings) {
            errors.push(format!("fixture '{}': findings schema: {}", fixture_name, err));
        }

        if let Some(list) = findings.get("findings").and_then(|v| v.as_array()) {
            for (i, finding) in list.iter().enumerate() {
                if let Some(path) = finding.pointer("/location/path").and_then(|v| v.as_str())
                    && !is_clean_path(path)
                {
                    errors.push(format!(
                        "fixture '{}': findings[{}].location.path '{}' is not clean",
                        fixture_name, i, path
                    ));
                }
            }
        }

        let golden_path = fixture_dir.join("expected.audit-findings.json");
        if golden_path.exists() {
            let golden = normalize_nondeterministic(read_json(&golden_path)?);
            if normalize_nondeterministic(findings) != golden {
                errors.push(format!(
                    "fixture '{}': output differs from expected.audit-findings.json",
                    fixture_name
                ));
            } else {
                println!("  ✓ fixture '{}' matches golden findings", fixture_name);
            }
        } else {
            println!("  ✓ fixture '{}' produces valid reports", fixture_name);
        }
        fixture_count += 1;
    }

    if fixture_count == 0 && errors.is_empty() {
        bail!("No fixtures with a src/ directory found in {}", fixtures_dir.display());
    }
    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixtures pass conformance checks!", fixture_count);
    Ok(())
}

/// Validate that all check IDs and violation classes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = tokenguard_types::all_check_ids();
    let classes = tokenguard_types::all_classes();

    let identifiers = check_ids
        .iter()
        .map(|id| ("Check ID", *id))
        .chain(classes.iter().map(|spec| ("Class", spec.class)));

    let mut errors = Vec::new();
    for (kind, identifier) in identifiers {
        match tokenguard_types::lookup_explanation(identifier) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("{} '{}' has empty title", kind, identifier));
                }
                if exp.description.is_empty() {
                    errors.push(format!("{} '{}' has empty description", kind, identifier));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("{} '{}' has empty remediation", kind, identifier));
                }
            }
            None => errors.push(format!("{} '{}' has no explanation", kind, identifier)),
        }
    }

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Explain coverage validation failed with {} errors", errors.len())
    }

    println!("✓ {} check IDs have explanations", check_ids.len());
    println!("✓ {} violation classes have explanations", classes.len());
    println!("\n✓ All explain coverage checks passed!");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
