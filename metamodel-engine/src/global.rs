//! The merged, project-wide meta-model.

use metamodel_types::{DocumentId, MetaKind, ModuleName, Name, NameMap};
use std::sync::Arc;

use crate::meta::{
    DeclarationSource, MetaAtomic, MetaBean, MetaBeanEnum, MetaCollection, MetaEntity, MetaEnum,
    MetaEvent, MetaItem, MetaMap, MetaRelation, RelationDirection, RelationEnd,
};

/// Every declaration sharing one name within one kind.
///
/// Declarations are ordered by precedence: custom documents first, then
/// out-of-the-box ones. There is always at least one declaration.
#[derive(Debug, PartialEq)]
pub struct GlobalEntity<T> {
    name: Name,
    declarations: Vec<Arc<T>>,
}

impl<T> Clone for GlobalEntity<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            declarations: self.declarations.clone(),
        }
    }
}

impl<T: MetaEntity> GlobalEntity<T> {
    pub(crate) fn new(first: Arc<T>) -> Self {
        Self {
            name: first.name().clone(),
            declarations: vec![first],
        }
    }

    pub(crate) fn push(&mut self, declaration: Arc<T>) {
        self.declarations.push(declaration);
    }

    /// Name as spelled by the highest-precedence declaration.
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The declaration that wins for single-valued, override-sensitive data.
    #[must_use]
    pub fn primary(&self) -> &Arc<T> {
        &self.declarations[0]
    }

    /// All declarations in precedence order.
    #[must_use]
    pub fn declarations(&self) -> &[Arc<T>] {
        &self.declarations
    }

    /// True when the highest-precedence declaration is customer-authored.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.primary().is_custom()
    }

    /// True when at least one out-of-the-box declaration exists.
    #[must_use]
    pub fn has_ootb_declaration(&self) -> bool {
        self.declarations.iter().any(|d| !d.is_custom())
    }

    pub fn sources(&self) -> impl Iterator<Item = &DeclarationSource> {
        self.declarations.iter().map(|d| d.source())
    }

    /// Distinct modules contributing to this entity, in precedence order.
    #[must_use]
    pub fn modules(&self) -> Vec<&ModuleName> {
        let mut modules: Vec<&ModuleName> = Vec::new();
        for source in self.sources() {
            if !modules.contains(&&source.module) {
                modules.push(&source.module);
            }
        }
        modules
    }

    /// The declaration contributed by `document`, if any.
    #[must_use]
    pub fn declaration_from(&self, document: &DocumentId) -> Option<&Arc<T>> {
        self.declarations
            .iter()
            .find(|d| &d.source().document == document)
    }
}

/// Index-based pointer to a relation end, resolved through the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationEndRef {
    pub relation: Name,
    pub direction: RelationDirection,
}

/// Borrowed view of a global entity of any kind.
#[derive(Debug, Clone, Copy)]
pub enum GlobalEntityRef<'a> {
    Item(&'a GlobalEntity<MetaItem>),
    Enum(&'a GlobalEntity<MetaEnum>),
    Relation(&'a GlobalEntity<MetaRelation>),
    Collection(&'a GlobalEntity<MetaCollection>),
    Map(&'a GlobalEntity<MetaMap>),
    Atomic(&'a GlobalEntity<MetaAtomic>),
    Bean(&'a GlobalEntity<MetaBean>),
    Event(&'a GlobalEntity<MetaEvent>),
    BeanEnum(&'a GlobalEntity<MetaBeanEnum>),
}

macro_rules! each_ref {
    ($value:expr, $entity:ident => $body:expr) => {
        match $value {
            GlobalEntityRef::Item($entity) => $body,
            GlobalEntityRef::Enum($entity) => $body,
            GlobalEntityRef::Relation($entity) => $body,
            GlobalEntityRef::Collection($entity) => $body,
            GlobalEntityRef::Map($entity) => $body,
            GlobalEntityRef::Atomic($entity) => $body,
            GlobalEntityRef::Bean($entity) => $body,
            GlobalEntityRef::Event($entity) => $body,
            GlobalEntityRef::BeanEnum($entity) => $body,
        }
    };
}

impl<'a> GlobalEntityRef<'a> {
    #[must_use]
    pub fn kind(&self) -> MetaKind {
        match self {
            GlobalEntityRef::Item(_) => MetaKind::Item,
            GlobalEntityRef::Enum(_) => MetaKind::Enum,
            GlobalEntityRef::Relation(_) => MetaKind::Relation,
            GlobalEntityRef::Collection(_) => MetaKind::Collection,
            GlobalEntityRef::Map(_) => MetaKind::Map,
            GlobalEntityRef::Atomic(_) => MetaKind::Atomic,
            GlobalEntityRef::Bean(_) => MetaKind::Bean,
            GlobalEntityRef::Event(_) => MetaKind::Event,
            GlobalEntityRef::BeanEnum(_) => MetaKind::BeanEnum,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a Name {
        each_ref!(*self, e => e.name())
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        each_ref!(*self, e => e.is_custom())
    }

    #[must_use]
    pub fn declaration_count(&self) -> usize {
        each_ref!(*self, e => e.declarations().len())
    }

    #[must_use]
    pub fn sources(&self) -> Vec<&'a DeclarationSource> {
        each_ref!(*self, e => e.sources().collect())
    }
}

/// Owned counterpart of [`GlobalEntityRef`], for callers that cannot hold
/// a borrow of the model. Cloning an entity only clones `Arc`s.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyGlobalEntity {
    Item(GlobalEntity<MetaItem>),
    Enum(GlobalEntity<MetaEnum>),
    Relation(GlobalEntity<MetaRelation>),
    Collection(GlobalEntity<MetaCollection>),
    Map(GlobalEntity<MetaMap>),
    Atomic(GlobalEntity<MetaAtomic>),
    Bean(GlobalEntity<MetaBean>),
    Event(GlobalEntity<MetaEvent>),
    BeanEnum(GlobalEntity<MetaBeanEnum>),
}

impl GlobalEntityRef<'_> {
    #[must_use]
    pub fn to_owned_entity(&self) -> AnyGlobalEntity {
        match *self {
            GlobalEntityRef::Item(e) => AnyGlobalEntity::Item(e.clone()),
            GlobalEntityRef::Enum(e) => AnyGlobalEntity::Enum(e.clone()),
            GlobalEntityRef::Relation(e) => AnyGlobalEntity::Relation(e.clone()),
            GlobalEntityRef::Collection(e) => AnyGlobalEntity::Collection(e.clone()),
            GlobalEntityRef::Map(e) => AnyGlobalEntity::Map(e.clone()),
            GlobalEntityRef::Atomic(e) => AnyGlobalEntity::Atomic(e.clone()),
            GlobalEntityRef::Bean(e) => AnyGlobalEntity::Bean(e.clone()),
            GlobalEntityRef::Event(e) => AnyGlobalEntity::Event(e.clone()),
            GlobalEntityRef::BeanEnum(e) => AnyGlobalEntity::BeanEnum(e.clone()),
        }
    }
}

impl AnyGlobalEntity {
    #[must_use]
    pub fn as_entity_ref(&self) -> GlobalEntityRef<'_> {
        match self {
            AnyGlobalEntity::Item(e) => GlobalEntityRef::Item(e),
            AnyGlobalEntity::Enum(e) => GlobalEntityRef::Enum(e),
            AnyGlobalEntity::Relation(e) => GlobalEntityRef::Relation(e),
            AnyGlobalEntity::Collection(e) => GlobalEntityRef::Collection(e),
            AnyGlobalEntity::Map(e) => GlobalEntityRef::Map(e),
            AnyGlobalEntity::Atomic(e) => GlobalEntityRef::Atomic(e),
            AnyGlobalEntity::Bean(e) => GlobalEntityRef::Bean(e),
            AnyGlobalEntity::Event(e) => GlobalEntityRef::Event(e),
            AnyGlobalEntity::BeanEnum(e) => GlobalEntityRef::BeanEnum(e),
        }
    }

    #[must_use]
    pub fn kind(&self) -> MetaKind {
        self.as_entity_ref().kind()
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        self.as_entity_ref().name()
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.as_entity_ref().is_custom()
    }

    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.as_entity_ref().declaration_count()
    }
}

/// The merged model of every declaration document in a project.
///
/// Immutable once built by [`crate::merge`]; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalMetaModel {
    pub(crate) items: NameMap<GlobalEntity<MetaItem>>,
    pub(crate) enums: NameMap<GlobalEntity<MetaEnum>>,
    pub(crate) relations: NameMap<GlobalEntity<MetaRelation>>,
    pub(crate) collections: NameMap<GlobalEntity<MetaCollection>>,
    pub(crate) maps: NameMap<GlobalEntity<MetaMap>>,
    pub(crate) atomics: NameMap<GlobalEntity<MetaAtomic>>,
    pub(crate) beans: NameMap<GlobalEntity<MetaBean>>,
    pub(crate) events: NameMap<GlobalEntity<MetaEvent>>,
    pub(crate) bean_enums: NameMap<GlobalEntity<MetaBeanEnum>>,
    pub(crate) reverse_relation_ends: NameMap<Vec<RelationEndRef>>,
    pub(crate) documents: Vec<DocumentId>,
}

impl GlobalMetaModel {
    /// An empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entities of kind `T`, in merge order.
    #[must_use]
    pub fn entities<T: MetaEntity>(&self) -> &NameMap<GlobalEntity<T>> {
        T::global_map(self)
    }

    /// Case-insensitive lookup of an entity of kind `T`.
    #[must_use]
    pub fn find<T: MetaEntity>(&self, name: &str) -> Option<&GlobalEntity<T>> {
        T::global_map(self).get(name)
    }

    pub fn all<T: MetaEntity>(&self) -> impl Iterator<Item = &GlobalEntity<T>> {
        T::global_map(self).values()
    }

    /// Case-insensitive lookup by runtime kind.
    #[must_use]
    pub fn find_by_name(&self, kind: MetaKind, name: &str) -> Option<GlobalEntityRef<'_>> {
        match kind {
            MetaKind::Item => self.items.get(name).map(GlobalEntityRef::Item),
            MetaKind::Enum => self.enums.get(name).map(GlobalEntityRef::Enum),
            MetaKind::Relation => self.relations.get(name).map(GlobalEntityRef::Relation),
            MetaKind::Collection => self.collections.get(name).map(GlobalEntityRef::Collection),
            MetaKind::Map => self.maps.get(name).map(GlobalEntityRef::Map),
            MetaKind::Atomic => self.atomics.get(name).map(GlobalEntityRef::Atomic),
            MetaKind::Bean => self.beans.get(name).map(GlobalEntityRef::Bean),
            MetaKind::Event => self.events.get(name).map(GlobalEntityRef::Event),
            MetaKind::BeanEnum => self.bean_enums.get(name).map(GlobalEntityRef::BeanEnum),
        }
    }

    /// Every entity of `kind`, in merge order.
    #[must_use]
    pub fn get_all(&self, kind: MetaKind) -> Vec<GlobalEntityRef<'_>> {
        match kind {
            MetaKind::Item => self.items.values().map(GlobalEntityRef::Item).collect(),
            MetaKind::Enum => self.enums.values().map(GlobalEntityRef::Enum).collect(),
            MetaKind::Relation => self.relations.values().map(GlobalEntityRef::Relation).collect(),
            MetaKind::Collection => self
                .collections
                .values()
                .map(GlobalEntityRef::Collection)
                .collect(),
            MetaKind::Map => self.maps.values().map(GlobalEntityRef::Map).collect(),
            MetaKind::Atomic => self.atomics.values().map(GlobalEntityRef::Atomic).collect(),
            MetaKind::Bean => self.beans.values().map(GlobalEntityRef::Bean).collect(),
            MetaKind::Event => self.events.values().map(GlobalEntityRef::Event).collect(),
            MetaKind::BeanEnum => self
                .bean_enums
                .values()
                .map(GlobalEntityRef::BeanEnum)
                .collect(),
        }
    }

    /// Number of distinct names of `kind`.
    #[must_use]
    pub fn count(&self, kind: MetaKind) -> usize {
        self.get_all(kind).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        MetaKind::ALL.into_iter().all(|kind| self.count(kind) == 0)
    }

    /// Documents that contributed to this model, in merge order.
    #[must_use]
    pub fn documents(&self) -> &[DocumentId] {
        &self.documents
    }

    /// Resolves an index-based end reference.
    #[must_use]
    pub fn relation_end(&self, end: &RelationEndRef) -> Option<&RelationEnd> {
        self.relations
            .get(end.relation.as_str())?
            .end(end.direction)
    }

    /// Raw reverse-navigation references registered for `type_name`.
    #[must_use]
    pub fn relation_end_refs(&self, type_name: &str) -> &[RelationEndRef] {
        self.reverse_relation_ends
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Relation ends navigable from `type_name` (case-insensitive), not
    /// including ends declared for its supertypes.
    #[must_use]
    pub fn find_relation_ends_for(&self, type_name: &str) -> Vec<&RelationEnd> {
        self.relation_end_refs(type_name)
            .iter()
            .filter_map(|end| self.relation_end(end))
            .collect()
    }
}
