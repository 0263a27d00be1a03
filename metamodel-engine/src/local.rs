//! Per-document meta-model.

use metamodel_types::{DocumentId, DocumentStamp, Family, MetaKind, ModuleName, Name, NameMap};
use std::sync::Arc;

use crate::meta::{
    DeclarationSource, MetaAtomic, MetaBean, MetaBeanEnum, MetaCollection, MetaEntity, MetaEnum,
    MetaEvent, MetaItem, MetaMap, MetaRelation,
};

/// The entities declared by one document revision.
///
/// Built once per `(document, stamp)` and never mutated afterwards; a
/// global rebuild reuses the same `Arc<LocalMetaModel>` for every document
/// whose stamp did not change.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMetaModel {
    pub(crate) source: DeclarationSource,
    pub(crate) stamp: DocumentStamp,
    pub(crate) family: Family,
    pub(crate) items: NameMap<Arc<MetaItem>>,
    pub(crate) enums: NameMap<Arc<MetaEnum>>,
    pub(crate) relations: NameMap<Arc<MetaRelation>>,
    pub(crate) collections: NameMap<Arc<MetaCollection>>,
    pub(crate) maps: NameMap<Arc<MetaMap>>,
    pub(crate) atomics: NameMap<Arc<MetaAtomic>>,
    pub(crate) beans: NameMap<Arc<MetaBean>>,
    pub(crate) events: NameMap<Arc<MetaEvent>>,
    pub(crate) bean_enums: NameMap<Arc<MetaBeanEnum>>,
}

impl LocalMetaModel {
    pub(crate) fn empty(source: DeclarationSource, stamp: DocumentStamp, family: Family) -> Self {
        Self {
            source,
            stamp,
            family,
            items: NameMap::new(),
            enums: NameMap::new(),
            relations: NameMap::new(),
            collections: NameMap::new(),
            maps: NameMap::new(),
            atomics: NameMap::new(),
            beans: NameMap::new(),
            events: NameMap::new(),
            bean_enums: NameMap::new(),
        }
    }

    #[must_use]
    pub fn document(&self) -> &DocumentId {
        &self.source.document
    }

    #[must_use]
    pub fn module(&self) -> &ModuleName {
        &self.source.module
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.source.custom
    }

    #[must_use]
    pub fn source(&self) -> &DeclarationSource {
        &self.source
    }

    #[must_use]
    pub fn stamp(&self) -> DocumentStamp {
        self.stamp
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    /// Entities of kind `T` in document order.
    #[must_use]
    pub fn entities<T: MetaEntity>(&self) -> &NameMap<Arc<T>> {
        T::local_map(self)
    }

    /// Case-insensitive lookup of an entity of kind `T`.
    #[must_use]
    pub fn find<T: MetaEntity>(&self, name: &str) -> Option<&Arc<T>> {
        T::local_map(self).get(name)
    }

    /// Names declared for `kind`, in document order.
    #[must_use]
    pub fn names(&self, kind: MetaKind) -> Vec<&Name> {
        match kind {
            MetaKind::Item => self.items.names().collect(),
            MetaKind::Enum => self.enums.names().collect(),
            MetaKind::Relation => self.relations.names().collect(),
            MetaKind::Collection => self.collections.names().collect(),
            MetaKind::Map => self.maps.names().collect(),
            MetaKind::Atomic => self.atomics.names().collect(),
            MetaKind::Bean => self.beans.names().collect(),
            MetaKind::Event => self.events.names().collect(),
            MetaKind::BeanEnum => self.bean_enums.names().collect(),
        }
    }

    /// Total number of top-level entities across kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
            + self.enums.len()
            + self.relations.len()
            + self.collections.len()
            + self.maps.len()
            + self.atomics.len()
            + self.beans.len()
            + self.events.len()
            + self.bean_enums.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
