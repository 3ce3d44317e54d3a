//! Indexed view of the standards, properties, and tools catalogs.
//!
//! Building never fails: an absent or empty entity list is a valid, empty
//! namespace. Entities stay in document order for rule output while the
//! identifier sets are ordered so lookups and iteration are deterministic.

use crate::catalog::identity::EntityKind;
use crate::catalog::model::{CatalogDocuments, Entity, entity_list};
use crate::report::EntityCounts;
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default)]
struct Namespace {
    entities: Vec<Entity>,
    ids: BTreeSet<String>,
}

/// Catalog of all declared entities for one validation run.
///
/// Read-only once built; a later entity with an id already in its namespace
/// is kept in `entities` (so the duplicate rule can see it) but does not
/// change the identifier set.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    standards: Namespace,
    properties: Namespace,
    tools: Namespace,
}

impl Catalog {
    /// Extract entity sets from the three catalog documents.
    pub fn from_documents(documents: &CatalogDocuments) -> Self {
        let mut catalog = Catalog::default();
        for kind in EntityKind::ALL {
            let items = entity_list(documents.document(kind), kind.catalog_key());
            let namespace = catalog.namespace_mut(kind);
            for (position, record) in items.iter().enumerate() {
                let Some(entity) = Entity::from_record(kind, position, record) else {
                    tracing::trace!(kind = kind.as_str(), position, "skipping record without id");
                    continue;
                };
                namespace.ids.insert(entity.id.clone());
                namespace.entities.push(entity);
            }
            tracing::debug!(
                kind = kind.as_str(),
                records = items.len(),
                entities = namespace.entities.len(),
                "catalog namespace built"
            );
        }
        catalog
    }

    fn namespace(&self, kind: EntityKind) -> &Namespace {
        match kind {
            EntityKind::Standard => &self.standards,
            EntityKind::Property => &self.properties,
            EntityKind::Tool => &self.tools,
        }
    }

    fn namespace_mut(&mut self, kind: EntityKind) -> &mut Namespace {
        match kind {
            EntityKind::Standard => &mut self.standards,
            EntityKind::Property => &mut self.properties,
            EntityKind::Tool => &mut self.tools,
        }
    }

    /// Whether `id` is declared in the namespace for `kind`.
    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.namespace(kind).ids.contains(id)
    }

    /// Entities of one kind in document order, duplicates included.
    pub fn entities(&self, kind: EntityKind) -> &[Entity] {
        &self.namespace(kind).entities
    }

    /// Number of entity records accepted per kind.
    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            standards: self.standards.entities.len(),
            properties: self.properties.entities.len(),
            tools: self.tools.entities.len(),
        }
    }
}
