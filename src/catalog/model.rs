//! Generic document trees and the typed entities extracted from them.
//!
//! Documents arrive as `serde_json::Value` regardless of their on-disk syntax;
//! the loader owns parsing. Entities keep only what the rules need (id,
//! verification_type, position) and treat every other field as opaque.

use crate::catalog::identity::EntityKind;
use serde_json::Value;

/// The three parsed catalog documents for one validation run.
#[derive(Clone, Debug, Default)]
pub struct CatalogDocuments {
    pub standards: Value,
    pub properties: Value,
    pub tools: Value,
}

impl CatalogDocuments {
    pub fn document(&self, kind: EntityKind) -> &Value {
        match kind {
            EntityKind::Standard => &self.standards,
            EntityKind::Property => &self.properties,
            EntityKind::Tool => &self.tools,
        }
    }

    /// Combined `{standards, properties, tools}` tree used for schema
    /// conformance checks.
    pub fn assembled(&self) -> Value {
        let mut combined = serde_json::Map::new();
        for kind in EntityKind::ALL {
            let items = entity_list(self.document(kind), kind.catalog_key());
            combined.insert(
                kind.catalog_key().to_string(),
                Value::Array(items.to_vec()),
            );
        }
        Value::Object(combined)
    }
}

/// A catalog entry that declared an identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    /// Declared id as text; non-string scalars are rendered, never dropped.
    pub id: String,
    /// Raw `verification_type` value; only meaningful for properties and
    /// `None` when the value is blank.
    pub verification_type: Option<Value>,
    /// Zero-based index of the record inside its document's list.
    pub position: usize,
}

impl Entity {
    /// Build an entity from one list item.
    ///
    /// Returns `None` for items that are not mappings or whose `id` is
    /// missing or null. Those records are skipped without a violation: shape
    /// problems belong to the schema check, not the catalog builder. Any other
    /// `id`, including `""`, becomes an entity so the prefix rule sees it.
    pub fn from_record(kind: EntityKind, position: usize, record: &Value) -> Option<Self> {
        let fields = record.as_object()?;
        let id = match fields.get("id")? {
            Value::Null => return None,
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        let verification_type = match kind {
            EntityKind::Property => fields
                .get("verification_type")
                .filter(|value| !is_blank(value))
                .cloned(),
            _ => None,
        };
        Some(Self {
            kind,
            id,
            verification_type,
            position,
        })
    }
}

/// Whether an optional field counts as absent.
///
/// Null, `false`, zero, and empty strings, sequences, or mappings are blank.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Return the list stored under `key`, or an empty slice when the key is
/// missing, null, or not a sequence.
pub fn entity_list<'a>(document: &'a Value, key: &str) -> &'a [Value] {
    document
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
