//! Command-line front end for the specification validator.
//!
//! Locates the corpus, loads it, runs the engine, and renders the report as
//! text or JSON. Exit status: 0 on PASS, 1 on FAIL, 2 when a required input
//! could not be loaded.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use sddcheck::{
    CoverageSummary, EntityKind, ValidateOptions, ValidationReport, ValidationRun,
    find_corpus_root, validate_corpus,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_FAIL: u8 = 1;
const EXIT_FATAL: u8 = 2;

/// Validate catalogs and mapping files of an SDD specification corpus.
#[derive(Parser, Debug)]
#[command(name = "sdd-validate", version, about)]
struct Cli {
    /// Corpus root holding schema/ and spec/ (defaults to SDD_SPEC_ROOT or an upward search).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also check the assembled catalog against the JSON Schema.
    #[arg(long)]
    enforce_schema: bool,

    /// Include the property coverage summary.
    #[arg(long)]
    coverage: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<&'a CoverageSummary>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) if report.passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_FAIL),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cli: &Cli) -> Result<ValidationReport> {
    let options = ValidateOptions {
        enforce_schema: cli.enforce_schema,
        coverage: cli.coverage,
        ..Default::default()
    };
    let root = find_corpus_root(cli.root.as_deref(), &options.layout)?;
    tracing::info!(root = %root.display(), "validating corpus");

    let run = validate_corpus(&root, &options)?;
    match cli.format {
        OutputFormat::Json => {
            let output = JsonOutput {
                report: &run.report,
                coverage: run.coverage.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => render_text(&run, cli.enforce_schema),
    }
    Ok(run.report)
}

fn render_text(run: &ValidationRun, enforce_schema: bool) {
    let report = &run.report;
    println!("Validating SDD specification at {}\n", run.root.display());
    println!("Schema: {}", run.schema_path.display());
    if enforce_schema {
        println!("   schema conformance enforced");
    }
    for kind in EntityKind::ALL {
        println!(
            "   loaded {} {}",
            report.counts.get(kind),
            kind.catalog_key()
        );
    }
    println!();

    if let Some(coverage) = &run.coverage {
        println!("Coverage:");
        println!(
            "   {} of {} properties unmapped to any standard",
            coverage.unmapped.len(),
            coverage.properties.len()
        );
        for id in &coverage.unmapped {
            println!("     - {id}");
        }
        println!(
            "   {} of {} properties without a verifying tool",
            coverage.unverified.len(),
            coverage.properties.len()
        );
        for id in &coverage.unverified {
            println!("     - {id}");
        }
        println!();
    }

    println!("{}", "=".repeat(50));
    if report.passed() {
        println!("VALIDATION PASSED");
        println!("   Standards: {}", report.counts.standards);
        println!("   Properties: {}", report.counts.properties);
        println!("   Tools: {}", report.counts.tools);
    } else {
        println!(
            "VALIDATION FAILED ({} error(s)):\n",
            report.violations.len()
        );
        for (n, violation) in report.violations.iter().enumerate() {
            println!("   {}. {violation}", n + 1);
        }
    }
}
