//! Builds a [`LocalMetaModel`] from one declaration document.
//!
//! Nodes without a resolvable name are skipped at every level: an unnamed
//! item vanishes from the model, an unnamed attribute vanishes from its
//! item, and neither affects their siblings. Name-keyed children are stored
//! case-insensitively, so a later duplicate replaces an earlier one.

use metamodel_decl::{
    AnnotationNode, AtomicTypeNode, AttributeNode, BeanEnumNode, BeanNode, BeansDecl,
    CollectionTypeNode, CustomPropertyNode, DeclarationDocument, DeclarationNode, DeclarationRoot,
    DeploymentNode, EnumTypeNode, HintNode, ImportNode, IndexKeyNode, IndexNode, ItemTypeNode,
    ItemsDecl, MapTypeNode, ModifiersNode, PersistenceNode, PropertyNode, RelationElementNode,
    RelationNode,
};
use metamodel_types::{DocumentStamp, Name, NameMap};
use std::sync::Arc;
use tracing::trace;

use crate::local::LocalMetaModel;
use crate::meta::{
    AnnotationScope, Cardinality, CollectionType, DeclarationSource, EntityHeader, MetaAnnotation,
    MetaAtomic, MetaAttribute, MetaBean, MetaBeanEnum, MetaBeanEnumValue, MetaBeanProperty,
    MetaCollection, MetaCustomProperty, MetaDeployment, MetaEnum, MetaEnumValue, MetaEvent,
    MetaHint, MetaImport, MetaIndex, MetaIndexKey, MetaItem, MetaMap, MetaModifiers,
    MetaPersistence, MetaRelation, ORDERING_ATTRIBUTE_TYPE, OrderingAttribute, RelationDirection,
    RelationEnd,
};
use crate::name_provider::extract_name;

/// Bean `type` attribute value that turns a bean into an event.
const EVENT_BEAN_TYPE: &str = "event";

/// Suffix of the position attribute derived from an ordered relation end.
const ORDERING_SUFFIX: &str = "POS";

/// Builds local models for documents of one module.
#[derive(Debug, Clone)]
pub struct LocalModelBuilder {
    source: DeclarationSource,
    stamp: DocumentStamp,
}

impl LocalModelBuilder {
    /// Creates a builder that tags every entity with `source`.
    #[must_use]
    pub fn new(source: DeclarationSource) -> Self {
        Self {
            source,
            stamp: DocumentStamp::default(),
        }
    }

    #[must_use]
    pub fn with_stamp(mut self, stamp: DocumentStamp) -> Self {
        self.stamp = stamp;
        self
    }

    /// Builds the local model of `document`, taking module, custom flag and
    /// stamp from its envelope.
    #[must_use]
    pub fn build_document(document: &DeclarationDocument) -> LocalMetaModel {
        Self::new(DeclarationSource {
            document: document.id.clone(),
            module: document.module.clone(),
            custom: document.custom,
        })
        .with_stamp(document.stamp)
        .build(&document.root)
    }

    #[must_use]
    pub fn build(&self, root: &DeclarationRoot) -> LocalMetaModel {
        let mut model = LocalMetaModel::empty(self.source.clone(), self.stamp, root.family());
        match root {
            DeclarationRoot::TypeSystem(items) => self.fill_items(&mut model, items),
            DeclarationRoot::BeanSystem(beans) => self.fill_beans(&mut model, beans),
        }
        model
    }

    // ── Type system ──────────────────────────────────────────────

    fn fill_items(&self, model: &mut LocalMetaModel, decl: &ItemsDecl) {
        for node in &decl.atomic_types {
            if let Some(atomic) = self.atomic(node) {
                insert(&mut model.atomics, atomic.header.name.clone(), atomic);
            }
        }
        for node in &decl.collection_types {
            if let Some(collection) = self.collection(node) {
                insert(&mut model.collections, collection.header.name.clone(), collection);
            }
        }
        for node in &decl.enum_types {
            if let Some(meta) = self.enumeration(node) {
                insert(&mut model.enums, meta.header.name.clone(), meta);
            }
        }
        for node in &decl.map_types {
            if let Some(map) = self.map(node) {
                insert(&mut model.maps, map.header.name.clone(), map);
            }
        }
        for node in &decl.relations {
            if let Some(relation) = self.relation(node) {
                insert(&mut model.relations, relation.header.name.clone(), relation);
            }
        }
        let grouped = decl.type_groups.iter().flat_map(|g| g.item_types.iter());
        for node in decl.item_types.iter().chain(grouped) {
            if let Some(item) = self.item(node) {
                insert(&mut model.items, item.header.name.clone(), item);
            }
        }
    }

    fn atomic(&self, node: &AtomicTypeNode) -> Option<MetaAtomic> {
        let name = self.named(DeclarationNode::Atomic(node))?;
        Some(MetaAtomic {
            header: self.header(name),
            extends: text(&node.extends),
            autocreate: node.autocreate.unwrap_or(true),
            generate: node.generate.unwrap_or(true),
        })
    }

    fn collection(&self, node: &CollectionTypeNode) -> Option<MetaCollection> {
        let name = self.named(DeclarationNode::Collection(node))?;
        Some(MetaCollection {
            header: self.header(name),
            element_type: text(&node.element_type),
            collection_type: CollectionType::parse(node.collection_type.as_deref()),
            autocreate: node.autocreate.unwrap_or(true),
            generate: node.generate.unwrap_or(true),
        })
    }

    fn map(&self, node: &MapTypeNode) -> Option<MetaMap> {
        let name = self.named(DeclarationNode::Map(node))?;
        Some(MetaMap {
            header: self.header(name),
            argument_type: text(&node.argument_type),
            return_type: text(&node.return_type),
            autocreate: node.autocreate.unwrap_or(true),
            generate: node.generate.unwrap_or(true),
            redeclare: node.redeclare.unwrap_or(false),
        })
    }

    fn enumeration(&self, node: &EnumTypeNode) -> Option<MetaEnum> {
        let name = self.named(DeclarationNode::Enum(node))?;
        let values = node
            .values
            .iter()
            .filter_map(|value| {
                let code = self.named(DeclarationNode::EnumValue(value))?;
                let meta = MetaEnumValue {
                    code: code.clone(),
                    description: text(&value.description),
                };
                Some((code, meta))
            })
            .collect();

        Some(MetaEnum {
            header: self.header(name),
            dynamic: node.dynamic,
            autocreate: node.autocreate,
            generate: node.generate,
            jalo_class: text(&node.jalo_class),
            description: text(&node.description),
            values,
        })
    }

    fn relation(&self, node: &RelationNode) -> Option<MetaRelation> {
        let name = self.named(DeclarationNode::Relation(node))?;
        let source =
            self.relation_end(&name, RelationDirection::Source, node.source_element.as_ref());
        let target =
            self.relation_end(&name, RelationDirection::Target, node.target_element.as_ref());
        let ordering_attributes = [&source, &target]
            .into_iter()
            .flatten()
            .filter_map(|end| ordering_attribute(&name, end))
            .collect();

        Some(MetaRelation {
            header: self.header(name),
            localized: node.localized.unwrap_or(false),
            autocreate: node.autocreate.unwrap_or(true),
            generate: node.generate.unwrap_or(true),
            description: text(&node.description),
            deployment: deployment(node.deployment.as_ref()),
            source,
            target,
            ordering_attributes,
        })
    }

    /// Builds one relation end. Ends without an element or without a
    /// resolvable type are left out; the relation itself is kept.
    fn relation_end(
        &self,
        relation: &Name,
        direction: RelationDirection,
        element: Option<&RelationElementNode>,
    ) -> Option<RelationEnd> {
        let Some(element) = element else {
            trace!(relation = %relation, %direction, "relation end missing");
            return None;
        };
        let Some(owner_type) = element.type_name.as_deref().and_then(Name::parse) else {
            trace!(relation = %relation, %direction, "relation end has no type");
            return None;
        };

        Some(RelationEnd {
            relation: relation.clone(),
            direction,
            owner_type,
            qualifier: extract_name(DeclarationNode::RelationElement(element)),
            cardinality: Cardinality::parse(element.cardinality.as_deref()),
            navigable: element.navigable.unwrap_or(true),
            ordered: element.ordered.unwrap_or(false),
            collection_type: CollectionType::parse(element.collection_type.as_deref()),
            description: text(&element.description),
            modifiers: modifiers(element.modifiers.as_ref()),
            custom_properties: self.custom_properties(&element.custom_properties),
        })
    }

    fn item(&self, node: &ItemTypeNode) -> Option<MetaItem> {
        let name = self.named(DeclarationNode::Item(node))?;
        let attributes = node
            .attributes
            .iter()
            .filter_map(|attribute| self.attribute(attribute))
            .map(|attribute| (attribute.qualifier.clone(), attribute))
            .collect();
        let indexes = node
            .indexes
            .iter()
            .filter_map(|index| self.index(index))
            .map(|index| (index.name.clone(), index))
            .collect();

        Some(MetaItem {
            header: self.header(name),
            extends: node.extends.as_deref().and_then(Name::parse),
            jalo_class: text(&node.jalo_class),
            metatype: text(&node.metatype),
            description: text(&node.description),
            is_abstract: node.is_abstract,
            autocreate: node.autocreate,
            generate: node.generate,
            singleton: node.singleton,
            jalo_only: node.jalo_only,
            deployment: deployment(node.deployment.as_ref()),
            custom_properties: self.custom_properties(&node.custom_properties),
            attributes,
            indexes,
        })
    }

    fn attribute(&self, node: &AttributeNode) -> Option<MetaAttribute> {
        let qualifier = self.named(DeclarationNode::Attribute(node))?;
        Some(MetaAttribute {
            qualifier,
            type_name: text(&node.type_name),
            redeclare: node.redeclare.unwrap_or(false),
            autocreate: node.autocreate.unwrap_or(true),
            generate: node.generate.unwrap_or(true),
            description: text(&node.description),
            default_value: text(&node.default_value),
            persistence: node.persistence.as_ref().map(persistence),
            modifiers: modifiers(node.modifiers.as_ref()),
            custom_properties: self.custom_properties(&node.custom_properties),
        })
    }

    fn index(&self, node: &IndexNode) -> Option<MetaIndex> {
        let name = self.named(DeclarationNode::Index(node))?;
        Some(MetaIndex {
            name,
            unique: node.unique.unwrap_or(false),
            replace: node.replace.unwrap_or(false),
            remove: node.remove.unwrap_or(false),
            keys: index_keys(&node.keys),
            include: index_keys(&node.include),
        })
    }

    fn custom_properties(&self, nodes: &[CustomPropertyNode]) -> NameMap<MetaCustomProperty> {
        nodes
            .iter()
            .filter_map(|node| {
                let name = self.named(DeclarationNode::CustomProperty(node))?;
                let property = MetaCustomProperty {
                    name: name.clone(),
                    value: text(&node.value),
                };
                Some((name, property))
            })
            .collect()
    }

    // ── Bean system ──────────────────────────────────────────────

    fn fill_beans(&self, model: &mut LocalMetaModel, decl: &BeansDecl) {
        for node in &decl.beans {
            let Some(bean) = self.bean(DeclarationNode::Bean(node), node) else {
                continue;
            };
            if is_event_bean(node) {
                insert(&mut model.events, bean.header.name.clone(), MetaEvent(bean));
            } else {
                insert(&mut model.beans, bean.header.name.clone(), bean);
            }
        }
        for node in &decl.events {
            if let Some(bean) = self.bean(DeclarationNode::Event(node), node) {
                insert(&mut model.events, bean.header.name.clone(), MetaEvent(bean));
            }
        }
        for node in &decl.enums {
            if let Some(meta) = self.bean_enum(node) {
                insert(&mut model.bean_enums, meta.header.name.clone(), meta);
            }
        }
    }

    fn bean(&self, dispatch: DeclarationNode<'_>, node: &BeanNode) -> Option<MetaBean> {
        let name = self.named(dispatch)?;
        let properties = node
            .properties
            .iter()
            .filter_map(|property| self.bean_property(property))
            .map(|property| (property.name.clone(), property))
            .collect();

        Some(MetaBean {
            header: self.header(name),
            extends: text(&node.extends),
            template: text(&node.template),
            is_abstract: node.is_abstract,
            deprecated: node.deprecated,
            deprecated_since: text(&node.deprecated_since),
            super_equals: node.super_equals,
            description: text(&node.description),
            imports: self.imports(&node.imports),
            annotations: self.annotations(&node.annotations),
            properties,
            hints: self.hints(&node.hints),
        })
    }

    fn bean_property(&self, node: &PropertyNode) -> Option<MetaBeanProperty> {
        let name = self.named(DeclarationNode::Property(node))?;
        Some(MetaBeanProperty {
            name,
            type_name: text(&node.type_name),
            equals: node.equals.unwrap_or(false),
            deprecated: node.deprecated.unwrap_or(false),
            deprecated_since: text(&node.deprecated_since),
            description: text(&node.description),
            annotations: self.annotations(&node.annotations),
            hints: self.hints(&node.hints),
        })
    }

    fn bean_enum(&self, node: &BeanEnumNode) -> Option<MetaBeanEnum> {
        let name = self.named(DeclarationNode::BeanEnum(node))?;
        let values = node
            .values
            .iter()
            .filter_map(|value| self.named(DeclarationNode::BeanEnumValue(value)))
            .map(|value| (value.clone(), MetaBeanEnumValue { value }))
            .collect();

        Some(MetaBeanEnum {
            header: self.header(name),
            template: text(&node.template),
            deprecated: node.deprecated.unwrap_or(false),
            deprecated_since: text(&node.deprecated_since),
            description: text(&node.description),
            values,
        })
    }

    fn imports(&self, nodes: &[ImportNode]) -> NameMap<MetaImport> {
        nodes
            .iter()
            .filter_map(|node| {
                let type_name = self.named(DeclarationNode::Import(node))?;
                let import = MetaImport {
                    type_name: type_name.clone(),
                    is_static: node.is_static.unwrap_or(false),
                };
                Some((type_name, import))
            })
            .collect()
    }

    fn annotations(&self, nodes: &[AnnotationNode]) -> Vec<MetaAnnotation> {
        nodes
            .iter()
            .filter_map(|node| {
                let value = self.named(DeclarationNode::Annotation(node))?;
                Some(MetaAnnotation {
                    value: value.into(),
                    scope: AnnotationScope::parse(node.scope.as_deref()),
                })
            })
            .collect()
    }

    fn hints(&self, nodes: &[HintNode]) -> NameMap<MetaHint> {
        nodes
            .iter()
            .filter_map(|node| {
                let name = self.named(DeclarationNode::Hint(node))?;
                let hint = MetaHint {
                    name: name.clone(),
                    value: text(&node.value),
                };
                Some((name, hint))
            })
            .collect()
    }

    // ── Shared ───────────────────────────────────────────────────

    fn named(&self, node: DeclarationNode<'_>) -> Option<Name> {
        let name = extract_name(node);
        if name.is_none() {
            trace!(
                document = %self.source.document,
                node = node.label(),
                "skipping declaration without a name"
            );
        }
        name
    }

    fn header(&self, name: Name) -> EntityHeader {
        EntityHeader {
            name,
            source: self.source.clone(),
        }
    }
}

fn insert<T>(map: &mut NameMap<Arc<T>>, name: Name, entity: T) {
    map.insert(name, Arc::new(entity));
}

fn is_event_bean(node: &BeanNode) -> bool {
    node.bean_type
        .as_deref()
        .is_some_and(|t| t.trim().eq_ignore_ascii_case(EVENT_BEAN_TYPE))
}

/// Trimmed, non-empty text value.
fn text(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn deployment(node: Option<&DeploymentNode>) -> Option<MetaDeployment> {
    let node = node?;
    let deployment = MetaDeployment {
        table: text(&node.table),
        typecode: text(&node.typecode),
        properties_table: text(&node.properties_table),
    };
    let declared = deployment.table.is_some()
        || deployment.typecode.is_some()
        || deployment.properties_table.is_some();
    declared.then_some(deployment)
}

fn persistence(node: &PersistenceNode) -> MetaPersistence {
    MetaPersistence {
        persistence_type: text(&node.persistence_type),
        qualifier: text(&node.qualifier),
        attribute_handler: text(&node.attribute_handler),
    }
}

fn modifiers(node: Option<&ModifiersNode>) -> MetaModifiers {
    let defaults = MetaModifiers::default();
    let Some(node) = node else {
        return defaults;
    };
    MetaModifiers {
        read: node.read.unwrap_or(defaults.read),
        write: node.write.unwrap_or(defaults.write),
        search: node.search.unwrap_or(defaults.search),
        optional: node.optional.unwrap_or(defaults.optional),
        private: node.private.unwrap_or(defaults.private),
        initial: node.initial.unwrap_or(defaults.initial),
        remove: node.remove.unwrap_or(defaults.remove),
        unique: node.unique.unwrap_or(defaults.unique),
        part_of: node.part_of.unwrap_or(defaults.part_of),
        encrypted: node.encrypted.unwrap_or(defaults.encrypted),
        do_not_optimize: node.do_not_optimize.unwrap_or(defaults.do_not_optimize),
    }
}

fn index_keys(nodes: &[IndexKeyNode]) -> Vec<MetaIndexKey> {
    nodes
        .iter()
        .filter_map(|node| {
            Some(MetaIndexKey {
                attribute: node.attribute.as_deref().and_then(Name::parse)?,
                lower: node.lower.unwrap_or(false),
            })
        })
        .collect()
}

/// Position attribute for an ordered, many-valued end, named after the
/// end's qualifier (or the relation when the end is unqualified).
fn ordering_attribute(relation: &Name, end: &RelationEnd) -> Option<OrderingAttribute> {
    if !end.ordered || end.cardinality != Cardinality::Many {
        return None;
    }
    let base = end.qualifier.as_ref().unwrap_or(relation);
    Some(OrderingAttribute {
        owner_type: end.owner_type.clone(),
        qualifier: Name::parse(&format!("{base}{ORDERING_SUFFIX}"))?,
        type_name: ORDERING_ATTRIBUTE_TYPE.to_string(),
    })
}
