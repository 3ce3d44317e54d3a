// Integration suite for the validator: corpus loading, engine verdicts, and the
// command-line contract (output formats and exit codes).
mod support;

use anyhow::Result;
use sddcheck::{
    EntityCounts, EntityKind, LoadError, ValidateOptions, Verdict, ViolationKind, validate_corpus,
};
use serde_json::Value;
use support::{Corpus, run_validator};

const STANDARDS: &str = "\
standards:
  - id: std:iso-27001
    title: ISO/IEC 27001
  - id: std:soc2
    title: SOC 2
";

const PROPERTIES: &str = "\
properties:
  - id: prop:encryption-at-rest
    verification_type: library
  - id: prop:audit-logging
    verification_type: manual
  - id: prop:least-privilege
";

const TOOLS: &str = "\
tools:
  - id: tool:semgrep
  - id: tool:trivy
";

const MAPPINGS: &str = "\
mappings:
  - property_id: prop:encryption-at-rest
    standard_id: std:iso-27001
  - property_id: prop:audit-logging
    standard_id: std:soc2
";

const VERIFICATIONS: &str = "\
verifications:
  - property_id: prop:encryption-at-rest
    tool_id: tool:semgrep
";

fn healthy_corpus() -> Result<Corpus> {
    let corpus = Corpus::empty()?;
    corpus.write(&corpus.layout.standards, STANDARDS)?;
    corpus.write(&corpus.layout.properties, PROPERTIES)?;
    corpus.write(&corpus.layout.tools, TOOLS)?;
    corpus.write(&corpus.layout.mappings, MAPPINGS)?;
    corpus.write(&corpus.layout.verifications, VERIFICATIONS)?;
    Ok(corpus)
}

#[test]
fn empty_corpus_passes() -> Result<()> {
    let corpus = Corpus::empty()?;
    let report = validate_corpus(corpus.root(), &ValidateOptions::default())?.report;
    assert_eq!(report.verdict, Verdict::Pass);
    assert!(report.violations.is_empty());
    assert_eq!(report.counts, EntityCounts::default());
    Ok(())
}

#[test]
fn healthy_corpus_passes_with_counts() -> Result<()> {
    let corpus = healthy_corpus()?;
    let report = validate_corpus(corpus.root(), &ValidateOptions::default())?.report;
    assert!(report.passed(), "unexpected violations: {:?}", report.violations);
    assert_eq!(
        report.counts,
        EntityCounts {
            standards: 2,
            properties: 3,
            tools: 2
        }
    );
    Ok(())
}

#[test]
fn dangling_references_fail_the_run() -> Result<()> {
    let corpus = healthy_corpus()?;
    corpus.write(
        &corpus.layout.mappings,
        "mappings:\n  - property_id: prop:audit-logging\n    standard_id: std:unknown\n",
    )?;
    corpus.write(
        &corpus.layout.verifications,
        "verifications:\n  - property_id: prop:audit-logging\n    tool_id: tool:unknown\n",
    )?;

    let report = validate_corpus(corpus.root(), &ValidateOptions::default())?.report;
    assert_eq!(report.verdict, Verdict::Fail);
    let found: Vec<_> = report
        .violations
        .iter()
        .map(|v| (v.kind.clone(), v.identifier.clone().unwrap_or_default()))
        .collect();
    assert_eq!(
        found,
        vec![
            (
                ViolationKind::DanglingReference {
                    namespace: EntityKind::Standard
                },
                "std:unknown".to_string()
            ),
            (
                ViolationKind::DanglingReference {
                    namespace: EntityKind::Tool
                },
                "tool:unknown".to_string()
            ),
        ]
    );
    Ok(())
}

#[test]
fn missing_mapping_files_are_tolerated() -> Result<()> {
    let corpus = healthy_corpus()?;
    corpus.remove(&corpus.layout.mappings)?;
    corpus.remove(&corpus.layout.verifications)?;
    let report = validate_corpus(corpus.root(), &ValidateOptions::default())?.report;
    assert!(report.passed());
    Ok(())
}

#[test]
fn missing_catalog_aborts_before_validation() -> Result<()> {
    let corpus = healthy_corpus()?;
    corpus.remove(&corpus.layout.standards)?;
    let err = validate_corpus(corpus.root(), &ValidateOptions::default())
        .expect_err("missing catalog must be fatal");
    let load_error = err
        .downcast_ref::<LoadError>()
        .expect("fatal error should carry LoadError");
    assert!(matches!(load_error, LoadError::Missing { .. }));
    Ok(())
}

#[test]
fn schema_conformance_is_opt_in() -> Result<()> {
    let corpus = healthy_corpus()?;
    corpus.write(
        &corpus.layout.schema,
        r#"{
  "type": "object",
  "properties": {
    "standards": {
      "type": "array",
      "items": {"type": "object", "required": ["id", "title", "url"]}
    }
  }
}"#,
    )?;

    let relaxed = validate_corpus(corpus.root(), &ValidateOptions::default())?.report;
    assert!(relaxed.passed());

    let strict = validate_corpus(
        corpus.root(),
        &ValidateOptions {
            enforce_schema: true,
            ..Default::default()
        },
    )?
    .report;
    assert_eq!(strict.violations.len(), 2);
    assert!(
        strict
            .violations
            .iter()
            .all(|v| v.kind == ViolationKind::SchemaConformance)
    );
    Ok(())
}

#[test]
fn cli_exit_codes_track_verdict() -> Result<()> {
    let corpus = healthy_corpus()?;
    let pass = run_validator(&corpus, &[])?;
    assert_eq!(pass.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&pass.stdout);
    assert!(stdout.contains("VALIDATION PASSED"), "stdout: {stdout}");
    assert!(stdout.contains("Standards: 2"));

    corpus.write(
        &corpus.layout.properties,
        "properties:\n  - id: bogus-prop\n    verification_type: bogus\n",
    )?;
    let fail = run_validator(&corpus, &[])?;
    assert_eq!(fail.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&fail.stdout);
    assert!(stdout.contains("VALIDATION FAILED"), "stdout: {stdout}");
    assert!(stdout.contains("   4. Property ID must start with 'prop:': bogus-prop"));
    assert!(stdout.contains("   5. Invalid verification_type 'bogus' in bogus-prop"));

    corpus.remove(&corpus.layout.schema)?;
    let fatal = run_validator(&corpus, &[])?;
    assert_eq!(fatal.status.code(), Some(2));
    Ok(())
}

#[test]
fn cli_json_output_carries_report_and_coverage() -> Result<()> {
    let corpus = healthy_corpus()?;
    let output = run_validator(&corpus, &["--format", "json", "--coverage"])?;
    assert_eq!(output.status.code(), Some(0));

    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value.get("verdict").and_then(Value::as_str), Some("PASS"));
    assert_eq!(
        value.pointer("/counts/properties").and_then(Value::as_u64),
        Some(3)
    );
    let unmapped = value
        .pointer("/coverage/unmapped")
        .and_then(Value::as_array)
        .expect("coverage.unmapped present");
    assert_eq!(unmapped, &vec![Value::from("prop:least-privilege")]);
    let unverified = value
        .pointer("/coverage/unverified")
        .and_then(Value::as_array)
        .expect("coverage.unverified present");
    assert_eq!(unverified.len(), 2);
    Ok(())
}

#[test]
fn cli_enforce_schema_fails_on_schema_errors() -> Result<()> {
    let corpus = healthy_corpus()?;
    corpus.write(
        &corpus.layout.schema,
        r#"{"type": "object", "properties": {"tools": {"type": "array", "items": {"required": ["vendor"]}}}}"#,
    )?;

    let relaxed = run_validator(&corpus, &[])?;
    assert_eq!(relaxed.status.code(), Some(0));

    let strict = run_validator(&corpus, &["--enforce-schema"])?;
    assert_eq!(strict.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&strict.stdout);
    assert!(stdout.contains("VALIDATION FAILED (2 error(s))"), "stdout: {stdout}");
    assert!(stdout.contains("1. Schema violation at /tools/0"), "stdout: {stdout}");
    Ok(())
}

#[test]
fn coverage_follows_catalog_order() -> Result<()> {
    let corpus = healthy_corpus()?;
    let run = validate_corpus(
        corpus.root(),
        &ValidateOptions {
            coverage: true,
            ..Default::default()
        },
    )?;
    assert!(run.report.passed());
    let coverage = run.coverage.expect("coverage requested");
    let order: Vec<_> = coverage
        .properties
        .iter()
        .map(|entry| entry.property_id.as_str())
        .collect();
    assert_eq!(
        order,
        vec!["prop:encryption-at-rest", "prop:audit-logging", "prop:least-privilege"]
    );

    let plain = validate_corpus(corpus.root(), &ValidateOptions::default())?;
    assert!(plain.coverage.is_none());
    Ok(())
}
