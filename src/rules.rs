//! Catalog rules that do not depend on cross-document references.
//!
//! Three independent families: identifier prefixes, the verification_type
//! enumeration, and duplicate identifiers within a namespace. Each failing
//! entity yields one violation; no family suppresses another.

use crate::catalog::{Catalog, Entity, EntityKind, VerificationType};
use crate::report::{Violation, ViolationKind};
use serde_json::Value;
use std::collections::BTreeMap;

/// Run every rule family over the catalog.
///
/// Output order is prefix violations, then enumeration, then duplicates; within
/// a family entities are visited standards, properties, tools in document order.
pub fn check_rules(catalog: &Catalog) -> Vec<Violation> {
    let mut violations = check_identifier_prefixes(catalog);
    violations.extend(check_verification_types(catalog));
    violations.extend(check_duplicate_identifiers(catalog));
    tracing::debug!(violations = violations.len(), "catalog rules checked");
    violations
}

pub fn check_identifier_prefixes(catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();
    for kind in EntityKind::ALL {
        for entity in catalog.entities(kind) {
            if entity.id.starts_with(kind.prefix()) {
                continue;
            }
            violations.push(
                Violation::new(
                    ViolationKind::IdentifierPrefix { entity: kind },
                    format!(
                        "{} ID must start with '{}': {}",
                        kind.label(),
                        kind.prefix(),
                        entity.id
                    ),
                )
                .with_identifier(entity.id.clone()),
            );
        }
    }
    violations
}

/// Properties may omit `verification_type` (blank values count as omitted);
/// a declared value must belong to the closed enumeration.
pub fn check_verification_types(catalog: &Catalog) -> Vec<Violation> {
    catalog
        .entities(EntityKind::Property)
        .iter()
        .filter_map(invalid_verification_type)
        .collect()
}

fn invalid_verification_type(property: &Entity) -> Option<Violation> {
    let raw = property.verification_type.as_ref()?;
    let rendered = match raw {
        Value::String(text) => {
            let parsed = VerificationType::parse(text);
            if parsed.is_known() {
                return None;
            }
            parsed.as_str().to_string()
        }
        other => other.to_string(),
    };
    Some(
        Violation::new(
            ViolationKind::InvalidVerificationType,
            format!(
                "Invalid verification_type '{rendered}' in {} (expected one of: {})",
                property.id,
                VerificationType::ALLOWED.join(", ")
            ),
        )
        .with_identifier(property.id.clone()),
    )
}

/// Flag every repeat of an identifier after its first declaration.
pub fn check_duplicate_identifiers(catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();
    for kind in EntityKind::ALL {
        let mut first_seen: BTreeMap<&str, usize> = BTreeMap::new();
        for entity in catalog.entities(kind) {
            let Some(first) = first_seen.get(entity.id.as_str()).copied() else {
                first_seen.insert(&entity.id, entity.position);
                continue;
            };
            violations.push(
                Violation::new(
                    ViolationKind::DuplicateIdentifier { entity: kind },
                    format!(
                        "Duplicate {} ID {} at {} #{} (first declared at #{})",
                        kind.as_str(),
                        entity.id,
                        kind.catalog_key(),
                        entity.position + 1,
                        first + 1
                    ),
                )
                .with_identifier(entity.id.clone()),
            );
        }
    }
    violations
}
