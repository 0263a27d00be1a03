//! Meta entities: the built, immutable form of declarations.
//!
//! Every top-level entity carries an [`EntityHeader`] naming it and the
//! document it was declared in. Entities are shared behind `Arc` so local
//! models can be reused across global rebuilds without copying.

mod beans;
mod items;
mod relation;
mod simple;

pub use beans::{
    AnnotationScope, MetaAnnotation, MetaBean, MetaBeanEnum, MetaBeanEnumValue, MetaBeanProperty,
    MetaEvent, MetaHint, MetaImport,
};
pub use items::{
    MetaAttribute, MetaCustomProperty, MetaDeployment, MetaEnum, MetaEnumValue, MetaIndex,
    MetaIndexKey, MetaItem, MetaModifiers, MetaPersistence,
};
pub use relation::{
    Cardinality, MetaRelation, ORDERING_ATTRIBUTE_TYPE, OrderingAttribute, RelationDirection,
    RelationEnd,
};
pub use simple::{CollectionType, MetaAtomic, MetaCollection, MetaMap};

use metamodel_types::{DocumentId, MetaKind, ModuleName, Name, NameMap};
use std::fmt::Debug;
use std::sync::Arc;

use crate::global::{GlobalEntity, GlobalMetaModel};
use crate::local::LocalMetaModel;

/// Where a declaration came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationSource {
    pub document: DocumentId,
    pub module: ModuleName,
    /// Declared in a customer-authored document.
    pub custom: bool,
}

/// Name and origin shared by every top-level entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityHeader {
    pub name: Name,
    pub source: DeclarationSource,
}

/// A top-level entity kind stored in local and global models.
///
/// The associated accessors select the map holding this kind, which lets the
/// builder, merger and read API stay generic over kinds.
pub trait MetaEntity: Debug + PartialEq + Sized + Send + Sync + 'static {
    const KIND: MetaKind;

    fn header(&self) -> &EntityHeader;

    fn local_map(model: &LocalMetaModel) -> &NameMap<Arc<Self>>;

    fn local_map_mut(model: &mut LocalMetaModel) -> &mut NameMap<Arc<Self>>;

    fn global_map(model: &GlobalMetaModel) -> &NameMap<GlobalEntity<Self>>;

    fn global_map_mut(model: &mut GlobalMetaModel) -> &mut NameMap<GlobalEntity<Self>>;

    fn name(&self) -> &Name {
        &self.header().name
    }

    fn source(&self) -> &DeclarationSource {
        &self.header().source
    }

    fn is_custom(&self) -> bool {
        self.header().source.custom
    }
}

macro_rules! meta_entity {
    ($ty:ty, $kind:ident, $field:ident $(, $inner:tt)?) => {
        impl $crate::meta::MetaEntity for $ty {
            const KIND: metamodel_types::MetaKind = metamodel_types::MetaKind::$kind;

            fn header(&self) -> &$crate::meta::EntityHeader {
                &self $(.$inner)? .header
            }

            fn local_map(
                model: &$crate::local::LocalMetaModel,
            ) -> &metamodel_types::NameMap<std::sync::Arc<Self>> {
                &model.$field
            }

            fn local_map_mut(
                model: &mut $crate::local::LocalMetaModel,
            ) -> &mut metamodel_types::NameMap<std::sync::Arc<Self>> {
                &mut model.$field
            }

            fn global_map(
                model: &$crate::global::GlobalMetaModel,
            ) -> &metamodel_types::NameMap<$crate::global::GlobalEntity<Self>> {
                &model.$field
            }

            fn global_map_mut(
                model: &mut $crate::global::GlobalMetaModel,
            ) -> &mut metamodel_types::NameMap<$crate::global::GlobalEntity<Self>> {
                &mut model.$field
            }
        }
    };
}

meta_entity!(MetaItem, Item, items);
meta_entity!(MetaEnum, Enum, enums);
meta_entity!(MetaRelation, Relation, relations);
meta_entity!(MetaCollection, Collection, collections);
meta_entity!(MetaMap, Map, maps);
meta_entity!(MetaAtomic, Atomic, atomics);
meta_entity!(MetaBean, Bean, beans);
meta_entity!(MetaEvent, Event, events, 0);
meta_entity!(MetaBeanEnum, BeanEnum, bean_enums);
