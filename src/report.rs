//! Violation records and the aggregated validation report.
//!
//! The report is plain data: presentation (text or JSON) and exit codes are
//! decided by the binary. Violation order is the order each stage produced
//! them, resolver output first.

use crate::catalog::EntityKind;
use serde::Serialize;
use std::fmt;

/// Which rule a violation broke.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A mapping or verification reference did not resolve in `namespace`.
    DanglingReference { namespace: EntityKind },
    /// A catalog id lacks the prefix required for `entity`.
    IdentifierPrefix { entity: EntityKind },
    /// A property declared a `verification_type` outside the enumeration.
    InvalidVerificationType,
    /// An id was declared more than once inside one namespace.
    DuplicateIdentifier { entity: EntityKind },
    /// The assembled catalog failed the JSON Schema.
    SchemaConformance,
}

/// One integrity or rule failure discovered during a run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Violation {
    #[serde(flatten)]
    pub kind: ViolationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            identifier: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
        }
    }
}

/// Number of catalog entities loaded per namespace.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EntityCounts {
    pub standards: usize,
    pub properties: usize,
    pub tools: usize,
}

impl EntityCounts {
    pub fn get(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Standard => self.standards,
            EntityKind::Property => self.properties,
            EntityKind::Tool => self.tools,
        }
    }
}

/// Outcome of one validation run.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationReport {
    pub verdict: Verdict,
    pub counts: EntityCounts,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Concatenate stage outputs and derive the verdict.
    ///
    /// Referential breaks come first, then rule violations, then schema
    /// conformance findings. Nothing is deduplicated or dropped.
    pub fn aggregate(
        counts: EntityCounts,
        resolver: Vec<Violation>,
        rules: Vec<Violation>,
        schema: Vec<Violation>,
    ) -> Self {
        let mut violations = resolver;
        violations.extend(rules);
        violations.extend(schema);
        let verdict = if violations.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail
        };
        Self {
            verdict,
            counts,
            violations,
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }
}
