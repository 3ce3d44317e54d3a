//! Document loading for a specification corpus on disk.
//!
//! Everything here is I/O glue: it resolves root-relative paths, parses YAML
//! into generic `serde_json::Value` trees, and decides which failures abort
//! the run. The validation engine never touches the filesystem.

use crate::catalog::{CatalogDocuments, EntityKind};
use crate::references::{MAPPINGS_KEY, VERIFICATIONS_KEY};
use crate::schema_loader::{SpecSchema, load_json_schema};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A required input could not be loaded; the run stops before validation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML syntax error in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("JSON syntax error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain a mapping at the top level, found {found}", path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("schema {} unusable: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },
}

/// Root-relative locations of every corpus input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorpusLayout {
    pub schema: PathBuf,
    pub standards: PathBuf,
    pub properties: PathBuf,
    pub tools: PathBuf,
    pub mappings: PathBuf,
    pub verifications: PathBuf,
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            schema: PathBuf::from("schema/sdd-spec.schema.json"),
            standards: PathBuf::from("spec/catalog/standards.yaml"),
            properties: PathBuf::from("spec/catalog/properties.yaml"),
            tools: PathBuf::from("spec/catalog/tools.yaml"),
            mappings: PathBuf::from("spec/mappings/property_to_standard.yaml"),
            verifications: PathBuf::from("spec/mappings/property_verifications.yaml"),
        }
    }
}

impl CorpusLayout {
    pub fn catalog_path(&self, kind: EntityKind) -> &Path {
        match kind {
            EntityKind::Standard => &self.standards,
            EntityKind::Property => &self.properties,
            EntityKind::Tool => &self.tools,
        }
    }
}

/// Every parsed document the engine consumes for one run.
#[derive(Clone, Debug, Default)]
pub struct CorpusDocuments {
    pub catalogs: CatalogDocuments,
    pub mappings: Value,
    pub verifications: Value,
}

/// Loaded corpus plus its compiled schema.
pub struct LoadedCorpus {
    pub root: PathBuf,
    pub schema: SpecSchema,
    pub documents: CorpusDocuments,
}

/// Load the schema, the three catalogs, and both cross-reference documents.
///
/// The schema and catalogs are required. A missing mapping or verification
/// file is tolerated and treated as an empty document; one that exists but
/// does not parse is still fatal.
pub fn load_corpus(root: &Path, layout: &CorpusLayout) -> Result<LoadedCorpus, LoadError> {
    let schema = load_json_schema(&root.join(&layout.schema))?;
    tracing::debug!(schema = %schema.path.display(), "schema loaded");

    let catalogs = CatalogDocuments {
        standards: load_yaml_mapping(&root.join(layout.catalog_path(EntityKind::Standard)))?,
        properties: load_yaml_mapping(&root.join(layout.catalog_path(EntityKind::Property)))?,
        tools: load_yaml_mapping(&root.join(layout.catalog_path(EntityKind::Tool)))?,
    };

    let mappings = load_optional_yaml_mapping(&root.join(&layout.mappings), MAPPINGS_KEY)?;
    let verifications =
        load_optional_yaml_mapping(&root.join(&layout.verifications), VERIFICATIONS_KEY)?;

    Ok(LoadedCorpus {
        root: root.to_path_buf(),
        schema,
        documents: CorpusDocuments {
            catalogs,
            mappings,
            verifications,
        },
    })
}

/// Parse a YAML file into a generic tree.
pub fn load_yaml(path: &Path) -> Result<Value, LoadError> {
    if !path.is_file() {
        return Err(LoadError::Missing {
            path: path.to_path_buf(),
        });
    }
    let data = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&data).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a YAML file that must hold a mapping at the top level.
///
/// Null (an empty file), scalars, and sequences are rejected; `{}` is a
/// valid, empty document.
pub fn load_yaml_mapping(path: &Path) -> Result<Value, LoadError> {
    let value = load_yaml(path)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(LoadError::NotAMapping {
            path: path.to_path_buf(),
            found: value_kind(&value),
        })
    }
}

fn load_optional_yaml_mapping(path: &Path, key: &str) -> Result<Value, LoadError> {
    match load_yaml_mapping(path) {
        Err(LoadError::Missing { path }) => {
            tracing::warn!(path = %path.display(), key, "cross-reference document missing; treating as empty");
            Ok(Value::Object(Default::default()))
        }
        other => other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
