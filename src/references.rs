//! Referential integrity between the cross-reference documents and the catalog.
//!
//! Mapping records link a property to a standard; verification records link a
//! property to a tool. Every present reference must resolve in the matching
//! namespace. Absent references are not checked.

use crate::catalog::{Catalog, EntityKind, entity_list, is_blank};
use crate::report::{Violation, ViolationKind};
use serde_json::Value;

pub const MAPPINGS_KEY: &str = "mappings";
pub const VERIFICATIONS_KEY: &str = "verifications";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Property→standard link read from the mappings document.
pub struct MappingRecord {
    pub property_id: Option<String>,
    pub standard_id: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Property→tool link read from the verifications document.
pub struct VerificationRecord {
    pub property_id: Option<String>,
    pub tool_id: Option<String>,
}

impl MappingRecord {
    pub fn from_value(record: &Value) -> Self {
        Self {
            property_id: reference_field(record, "property_id"),
            standard_id: reference_field(record, "standard_id"),
        }
    }

    fn references(&self) -> [(EntityKind, Option<&str>); 2] {
        [
            (EntityKind::Property, self.property_id.as_deref()),
            (EntityKind::Standard, self.standard_id.as_deref()),
        ]
    }
}

impl VerificationRecord {
    pub fn from_value(record: &Value) -> Self {
        Self {
            property_id: reference_field(record, "property_id"),
            tool_id: reference_field(record, "tool_id"),
        }
    }

    fn references(&self) -> [(EntityKind, Option<&str>); 2] {
        [
            (EntityKind::Property, self.property_id.as_deref()),
            (EntityKind::Tool, self.tool_id.as_deref()),
        ]
    }
}

/// Mapping records in document order.
pub fn mapping_records(document: &Value) -> Vec<MappingRecord> {
    entity_list(document, MAPPINGS_KEY)
        .iter()
        .map(MappingRecord::from_value)
        .collect()
}

/// Verification records in document order.
pub fn verification_records(document: &Value) -> Vec<VerificationRecord> {
    entity_list(document, VERIFICATIONS_KEY)
        .iter()
        .map(VerificationRecord::from_value)
        .collect()
}

/// Read an optional reference field from a record.
///
/// Missing and blank values (null, `false`, zero, empty) are absent. Other
/// non-string values are rendered as text so they can be reported; they
/// never resolve.
pub fn reference_field(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        value if is_blank(value) => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Check every present reference against the catalog.
///
/// Returns one violation per dangling reference rather than short-circuiting,
/// mappings first and then verifications, each in document order.
pub fn resolve_references(
    catalog: &Catalog,
    mappings: &Value,
    verifications: &Value,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mapping_records = mapping_records(mappings);
    for (idx, record) in mapping_records.iter().enumerate() {
        check_record(
            catalog,
            "Mapping",
            idx,
            &record.references(),
            &mut violations,
        );
    }

    let verification_records = verification_records(verifications);
    for (idx, record) in verification_records.iter().enumerate() {
        check_record(
            catalog,
            "Verification",
            idx,
            &record.references(),
            &mut violations,
        );
    }

    tracing::debug!(
        mappings = mapping_records.len(),
        verifications = verification_records.len(),
        dangling = violations.len(),
        "references resolved"
    );
    violations
}

fn check_record(
    catalog: &Catalog,
    source: &str,
    idx: usize,
    references: &[(EntityKind, Option<&str>)],
    violations: &mut Vec<Violation>,
) {
    for (namespace, reference) in references {
        let Some(id) = reference else {
            continue;
        };
        if catalog.contains(*namespace, id) {
            continue;
        }
        violations.push(
            Violation::new(
                ViolationKind::DanglingReference {
                    namespace: *namespace,
                },
                format!(
                    "{source} references unknown {}: {id} ({} #{})",
                    namespace.as_str(),
                    source.to_lowercase(),
                    idx + 1
                ),
            )
            .with_identifier(*id),
        );
    }
}
