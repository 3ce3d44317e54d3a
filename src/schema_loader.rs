//! JSON Schema loading for the specification corpus.
//!
//! The schema artifact is a hard precondition: it must exist, parse, and
//! compile. The file may be a plain schema or a descriptor wrapping one
//! (inline `schema` or a `schema_path` relative to the descriptor). Structural
//! checking itself is delegated to the `jsonschema` crate.

use crate::loader::LoadError;
use crate::report::{Violation, ViolationKind};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A compiled schema ready to check assembled catalogs.
pub struct SpecSchema {
    pub path: PathBuf,
    compiled: JSONSchema,
}

impl SpecSchema {
    /// Compile an in-memory schema value.
    pub fn compile(path: &Path, raw: &Value) -> Result<Self, LoadError> {
        let compiled = JSONSchema::compile(raw).map_err(|err| LoadError::Schema {
            path: path.to_path_buf(),
            reason: format!("compiling schema: {err}"),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            compiled,
        })
    }

    /// Validate `instance`, turning each schema error into a violation.
    pub fn conformance_violations(&self, instance: &Value) -> Vec<Violation> {
        match self.compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|err| {
                    let pointer = err.instance_path.to_string();
                    let location = if pointer.is_empty() {
                        "/".to_string()
                    } else {
                        pointer
                    };
                    Violation::new(
                        ViolationKind::SchemaConformance,
                        format!("Schema violation at {location}: {err}"),
                    )
                    .with_identifier(location)
                })
                .collect(),
        }
    }
}

/// Load, unwrap, and compile the schema at `path`.
pub fn load_json_schema(path: &Path) -> Result<SpecSchema, LoadError> {
    let descriptor_or_schema = read_json(path)?;

    let schema_value = if let Some(schema_path) =
        descriptor_or_schema.get("schema_path").and_then(Value::as_str)
    {
        let nested = Path::new(schema_path);
        let resolved = if nested.is_absolute() {
            nested.to_path_buf()
        } else {
            path.parent()
                .map(|base| base.join(nested))
                .unwrap_or_else(|| nested.to_path_buf())
        };
        tracing::debug!(descriptor = %path.display(), schema = %resolved.display(), "following schema_path");
        read_json(&resolved)?
    } else if let Some(inline) = descriptor_or_schema
        .get("schema")
        .filter(|value| value.is_object())
    {
        inline.clone()
    } else {
        descriptor_or_schema
    };

    if !schema_value.is_object() && !schema_value.is_boolean() {
        return Err(LoadError::Schema {
            path: path.to_path_buf(),
            reason: "schema must be a JSON object or boolean".to_string(),
        });
    }

    SpecSchema::compile(path, &schema_value)
}

fn read_json(path: &Path) -> Result<Value, LoadError> {
    if !path.is_file() {
        return Err(LoadError::Missing {
            path: path.to_path_buf(),
        });
    }
    let data = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
