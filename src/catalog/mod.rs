//! Entity catalog wiring.
//!
//! This module turns the parsed standards, properties, and tools documents
//! into typed identifier namespaces. `Catalog` is the read-only index the
//! resolver and rule checker consult; `model` holds the document and entity
//! types; `identity` holds the namespace and enumeration vocabulary.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{EntityKind, VerificationType};
pub use index::Catalog;
pub use model::{CatalogDocuments, Entity, entity_list, is_blank};
