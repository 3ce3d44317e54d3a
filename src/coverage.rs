//! Traceability accounting between catalog properties and the mapping files.
//!
//! Coverage is informational: it lists which standards and tools each
//! property is linked to so gaps are visible, but it never produces
//! violations. Links whose ends do not resolve are left to the resolver.

use crate::catalog::{Catalog, EntityKind};
use crate::references::{mapping_records, verification_records};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
/// Standards a property maps to and tools that verify it.
pub struct PropertyCoverage {
    pub property_id: String,
    pub standard_ids: Vec<String>,
    pub tool_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageSummary {
    pub properties: Vec<PropertyCoverage>,
    pub unmapped: Vec<String>,
    pub unverified: Vec<String>,
}

impl CoverageSummary {
    pub fn property(&self, id: &str) -> Option<&PropertyCoverage> {
        self.properties.iter().find(|entry| entry.property_id == id)
    }
}

/// Build coverage for every declared property, in catalog order.
///
/// A repeated property id keeps its first declaration. Linked ids are listed
/// in the order their records appear, without repeats.
pub fn build_coverage(catalog: &Catalog, mappings: &Value, verifications: &Value) -> CoverageSummary {
    let mut properties: Vec<PropertyCoverage> = Vec::new();
    let mut slots: BTreeMap<String, usize> = BTreeMap::new();
    for entity in catalog.entities(EntityKind::Property) {
        if slots.contains_key(&entity.id) {
            continue;
        }
        slots.insert(entity.id.clone(), properties.len());
        properties.push(PropertyCoverage {
            property_id: entity.id.clone(),
            standard_ids: Vec::new(),
            tool_ids: Vec::new(),
        });
    }

    for record in mapping_records(mappings) {
        let (Some(property), Some(standard)) = (record.property_id, record.standard_id) else {
            continue;
        };
        if !catalog.contains(EntityKind::Standard, &standard) {
            continue;
        }
        if let Some(&slot) = slots.get(&property) {
            push_unique(&mut properties[slot].standard_ids, standard);
        }
    }

    for record in verification_records(verifications) {
        let (Some(property), Some(tool)) = (record.property_id, record.tool_id) else {
            continue;
        };
        if !catalog.contains(EntityKind::Tool, &tool) {
            continue;
        }
        if let Some(&slot) = slots.get(&property) {
            push_unique(&mut properties[slot].tool_ids, tool);
        }
    }

    let unmapped = properties
        .iter()
        .filter(|entry| entry.standard_ids.is_empty())
        .map(|entry| entry.property_id.clone())
        .collect();
    let unverified = properties
        .iter()
        .filter(|entry| entry.tool_ids.is_empty())
        .map(|entry| entry.property_id.clone())
        .collect();

    CoverageSummary {
        properties,
        unmapped,
        unverified,
    }
}

fn push_unique(ids: &mut Vec<String>, id: String) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
