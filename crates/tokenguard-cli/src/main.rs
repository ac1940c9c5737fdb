//! CLI entry point for tokenguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging and exit codes.
//! All business logic lives in the `tokenguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use tokenguard_app::{
    AuditInput, ExplainOutput, LintInput, parse_report_json, render_annotations, render_markdown,
    render_summary, render_text, run_audit, run_explain, run_lint, serialize_json, to_renderable,
    to_renderable_summary, verdict_exit_code,
};
use tokenguard_settings::Overrides;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "tokenguard",
    version,
    about = "Design-token policy enforcement for component libraries and their consumers"
)]
struct Cli {
    /// Repository root; targets, config and reports are resolved against it.
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to tokenguard config TOML.
    #[arg(long, default_value = "tokenguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|library|audit).
    #[arg(long)]
    profile: Option<String>,

    /// Override the failing threshold (never|critical|major|minor|info).
    #[arg(long)]
    fail_on: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit a directory for closed-system violations (V1-V5) and write report artifacts.
    Audit {
        /// Directory to audit (defaults to `default_dir` from config, else `src`).
        dir: Option<Utf8PathBuf>,

        /// Where to write the summary and findings reports.
        #[arg(long)]
        reports_dir: Option<String>,
    },

    /// Run every enabled rule over files and directories.
    Lint {
        /// Files or directories to lint (defaults to `default_dir` from config, else `src`).
        paths: Vec<Utf8PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Render markdown from an existing findings report.
    Md {
        /// Path to the findings report.
        #[arg(long, default_value = "reports/closed-system-audit-findings.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing findings report.
    Annotations {
        /// Path to the findings report.
        #[arg(long, default_value = "reports/closed-system-audit-findings.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit (GitHub caps annotations per step).
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or violation class with remediation guidance.
    Explain {
        /// The check_id (e.g., "closed_system") or class (e.g., "v5_untyped_spread") to explain.
        identifier: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Github,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let code = match cli.cmd {
        Commands::Audit {
            ref dir,
            ref reports_dir,
        } => cmd_audit(&cli, dir.clone(), reports_dir.clone())?,
        Commands::Lint { ref paths, format } => cmd_lint(&cli, paths.clone(), format)?,
        Commands::Md { report, output } => cmd_md(report, output)?,
        Commands::Annotations { report, max } => cmd_annotations(report, max)?,
        Commands::Explain { identifier } => cmd_explain(&identifier),
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
///
/// `TOKENGUARD_LOG` takes `EnvFilter` directives, e.g. `TOKENGUARD_LOG=tokenguard_repo=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("TOKENGUARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("tokenguard=warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .try_init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        fail_on: cli.fail_on.clone(),
        reports_dir: None,
    }
}

/// Missing config is allowed (defaults apply).
fn read_config(cli: &Cli) -> String {
    let cfg_path = cli.repo_root.join(&cli.config);
    match std::fs::read_to_string(&cfg_path) {
        Ok(text) => {
            tracing::debug!(path = %cfg_path, "loaded config");
            text
        }
        Err(_) => {
            tracing::debug!(path = %cfg_path, "no config found; using defaults");
            String::new()
        }
    }
}

fn cmd_audit(
    cli: &Cli,
    dir: Option<Utf8PathBuf>,
    reports_dir: Option<String>,
) -> anyhow::Result<i32> {
    if !cli.repo_root.is_dir() {
        anyhow::bail!("repo root does not exist: {}", cli.repo_root);
    }
    let cfg_text = read_config(cli);

    let output = run_audit(AuditInput {
        repo_root: &cli.repo_root,
        config_text: &cfg_text,
        overrides: Overrides {
            reports_dir,
            ..overrides(cli)
        },
        dir,
    })?;

    let summary = to_renderable_summary(&output.summary, "Closed-system audit");
    print!("{}", render_summary(&summary));
    println!("Summary written to {}", output.summary_path);
    println!("Findings written to {}", output.findings_path);

    Ok(verdict_exit_code(output.summary.verdict))
}

fn cmd_lint(cli: &Cli, paths: Vec<Utf8PathBuf>, format: Format) -> anyhow::Result<i32> {
    if !cli.repo_root.is_dir() {
        anyhow::bail!("repo root does not exist: {}", cli.repo_root);
    }
    let cfg_text = read_config(cli);

    let output = run_lint(LintInput {
        repo_root: &cli.repo_root,
        config_text: &cfg_text,
        overrides: overrides(cli),
        targets: paths,
    })?;

    match format {
        Format::Text => print!("{}", render_text(&to_renderable(&output.report))),
        Format::Json => {
            let data = serialize_json(&output.report)?;
            print!("{}", String::from_utf8_lossy(&data));
        }
        Format::Github => {
            let renderable = to_renderable(&output.report);
            for annotation in render_annotations(&renderable, usize::MAX) {
                println!("{}", annotation);
            }
        }
    }

    Ok(verdict_exit_code(output.report.verdict))
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<i32> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(0)
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<i32> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;

    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }

    Ok(0)
}

fn cmd_explain(identifier: &str) -> i32 {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", tokenguard_app::format_explanation(&exp));
            0
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_classes,
        } => {
            eprint!(
                "{}",
                tokenguard_app::format_not_found(
                    &identifier,
                    &available_check_ids,
                    &available_classes
                )
            );
            1
        }
    }
}
