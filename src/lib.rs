//! Validation engine for SDD specification corpora.
//!
//! A corpus is three catalogs (standards, properties, tools) plus two
//! cross-reference documents (property→standard mappings and property→tool
//! verifications). The engine builds a `Catalog` from the parsed catalogs,
//! resolves every reference against it, applies the catalog rules, and
//! aggregates the findings into one `ValidationReport`.
//!
//! `validate` is pure and works on in-memory trees. `validate_corpus` and
//! `find_corpus_root` are the filesystem entry points used by the
//! `sdd-validate` binary; `validate_corpus` also builds the optional coverage
//! summary from the same `Catalog` the engine checked.

use anyhow::{Context, Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod coverage;
pub mod loader;
pub mod references;
pub mod report;
pub mod rules;
pub mod schema_loader;

pub use catalog::{Catalog, CatalogDocuments, Entity, EntityKind, VerificationType};
pub use coverage::{CoverageSummary, PropertyCoverage, build_coverage};
pub use loader::{CorpusDocuments, CorpusLayout, LoadError, LoadedCorpus, load_corpus};
pub use references::{MappingRecord, VerificationRecord, resolve_references};
pub use report::{EntityCounts, ValidationReport, Verdict, Violation, ViolationKind};
pub use rules::check_rules;
pub use schema_loader::{SpecSchema, load_json_schema};

/// Environment variable naming the corpus root explicitly.
pub const ROOT_ENV: &str = "SDD_SPEC_ROOT";

/// Options for a filesystem-backed validation run.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    pub layout: CorpusLayout,
    /// Check the assembled catalog against the loaded schema and report
    /// each schema error as a violation.
    pub enforce_schema: bool,
    /// Build the property coverage summary alongside the report.
    pub coverage: bool,
}

/// Outcome of `validate_corpus`.
#[derive(Debug)]
pub struct ValidationRun {
    pub root: PathBuf,
    pub schema_path: PathBuf,
    pub report: ValidationReport,
    pub coverage: Option<CoverageSummary>,
}

/// Run the engine over already-parsed documents.
///
/// When `schema` is provided the assembled catalog is also checked for
/// schema conformance. The result depends only on the inputs: violation
/// order is stable across runs.
pub fn validate(documents: &CorpusDocuments, schema: Option<&SpecSchema>) -> ValidationReport {
    let catalog = Catalog::from_documents(&documents.catalogs);
    validate_catalog(&catalog, documents, schema)
}

fn validate_catalog(
    catalog: &Catalog,
    documents: &CorpusDocuments,
    schema: Option<&SpecSchema>,
) -> ValidationReport {
    let dangling = resolve_references(catalog, &documents.mappings, &documents.verifications);
    let rule_violations = check_rules(catalog);
    let schema_violations = schema
        .map(|schema| schema.conformance_violations(&documents.catalogs.assembled()))
        .unwrap_or_default();

    let report = ValidationReport::aggregate(
        catalog.counts(),
        dangling,
        rule_violations,
        schema_violations,
    );
    tracing::debug!(
        verdict = report.verdict.as_str(),
        violations = report.violations.len(),
        "validation finished"
    );
    report
}

/// Load the corpus under `root` and validate it.
///
/// Load failures abort with an error before any violation is produced.
pub fn validate_corpus(root: &Path, options: &ValidateOptions) -> Result<ValidationRun> {
    let LoadedCorpus {
        root,
        schema,
        documents,
    } = load_corpus(root, &options.layout)
        .with_context(|| format!("loading corpus at {}", root.display()))?;

    let catalog = Catalog::from_documents(&documents.catalogs);
    let report = validate_catalog(
        &catalog,
        &documents,
        options.enforce_schema.then_some(&schema),
    );
    let coverage = options.coverage.then(|| {
        build_coverage(&catalog, &documents.mappings, &documents.verifications)
    });

    Ok(ValidationRun {
        root,
        schema_path: schema.path,
        report,
        coverage,
    })
}

/// Returns true when `candidate` holds the corpus schema.
fn is_corpus_root(candidate: &Path, layout: &CorpusLayout) -> bool {
    candidate.join(&layout.schema).is_file()
}

fn root_from_hint(hint: &str, layout: &CorpusLayout) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !is_corpus_root(&hint_path, layout) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path, layout: &CorpusLayout) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_corpus_root(&dir, layout) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the corpus root.
///
/// An explicit root wins and must contain the schema. Otherwise try
/// `SDD_SPEC_ROOT`, then climb up from the current directory, then the
/// build-time hint.
pub fn find_corpus_root(explicit: Option<&Path>, layout: &CorpusLayout) -> Result<PathBuf> {
    if let Some(root) = explicit {
        if !is_corpus_root(root, layout) {
            bail!(
                "{} is not a specification corpus: {} not found",
                root.display(),
                layout.schema.display()
            );
        }
        return fs::canonicalize(root)
            .with_context(|| format!("canonicalizing {}", root.display()));
    }

    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = root_from_hint(&env_root, layout) {
            return Ok(root);
        }
        tracing::warn!(value = %env_root, "{ROOT_ENV} does not point at a corpus; ignoring");
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd, layout) {
            return Ok(root);
        }
    }

    if let Some(hint) = option_env!("SDD_SPEC_ROOT_HINT") {
        if let Some(root) = root_from_hint(hint, layout) {
            return Ok(root);
        }
    }

    bail!("Unable to locate a specification corpus. Pass --root or set {ROOT_ENV}.");
}
