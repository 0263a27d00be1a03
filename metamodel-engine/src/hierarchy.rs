//! Supertype resolution over the global model.
//!
//! Hierarchies are walked by name through `extends`; a walk stops at the
//! first unknown supertype and never visits a type twice, so cyclic or
//! dangling declarations degrade to a shorter chain.

use metamodel_types::NameKey;
use std::collections::HashSet;

use crate::global::{GlobalEntity, GlobalMetaModel};
use crate::meta::{MetaBean, MetaEntity, MetaItem, RelationEnd};
use crate::views::{AttributeRef, PropertyRef};

/// Implicit root of every item type.
pub const GENERIC_ITEM: &str = "GenericItem";

impl GlobalMetaModel {
    /// `name` followed by its supertypes, nearest first.
    #[must_use]
    pub fn item_hierarchy(&self, name: &str) -> Vec<&GlobalEntity<MetaItem>> {
        walk(
            self.find::<MetaItem>(name),
            |item| item.extends(),
            |next| self.find::<MetaItem>(next),
        )
    }

    /// First declaration of `qualifier` on `item` or its supertypes.
    #[must_use]
    pub fn find_item_attribute(&self, item: &str, qualifier: &str) -> Option<AttributeRef<'_>> {
        self.item_hierarchy(item)
            .into_iter()
            .find_map(|entity| entity.find_attribute(qualifier))
    }

    /// Attributes visible on `item`, its own first, then inherited ones not
    /// redeclared lower in the hierarchy.
    #[must_use]
    pub fn all_item_attributes(&self, item: &str) -> Vec<AttributeRef<'_>> {
        let mut seen: HashSet<NameKey> = HashSet::new();
        self.item_hierarchy(item)
            .into_iter()
            .flat_map(|entity| entity.attributes())
            .filter(|attribute| seen.insert(attribute.attribute.qualifier.key()))
            .collect()
    }

    /// Relation ends navigable from `item` or any of its supertypes.
    #[must_use]
    pub fn all_relation_ends_for(&self, item: &str) -> Vec<&RelationEnd> {
        let hierarchy = self.item_hierarchy(item);
        if hierarchy.is_empty() {
            return self.find_relation_ends_for(item);
        }
        hierarchy
            .into_iter()
            .flat_map(|entity| self.find_relation_ends_for(entity.name().as_str()))
            .collect()
    }

    /// Item types whose merged `extends` names `item`.
    #[must_use]
    pub fn subtypes(&self, item: &str) -> Vec<&GlobalEntity<MetaItem>> {
        let key = NameKey::new(item);
        self.items
            .values()
            .filter(|entity| {
                entity.name().key() != key
                    && entity
                        .extends()
                        .is_some_and(|parent| NameKey::new(parent) == key)
            })
            .collect()
    }

    /// Bean `class` followed by its supertypes. Generic arguments on
    /// `extends` are ignored when resolving.
    #[must_use]
    pub fn bean_hierarchy(&self, class: &str) -> Vec<&GlobalEntity<MetaBean>> {
        walk(
            self.find::<MetaBean>(class),
            |bean| bean.extends_class(),
            |next| self.find::<MetaBean>(next),
        )
    }

    #[must_use]
    pub fn find_bean_property(&self, class: &str, name: &str) -> Option<PropertyRef<'_>> {
        self.bean_hierarchy(class)
            .into_iter()
            .find_map(|bean| bean.find_property(name))
    }
}

fn walk<'a, T>(
    start: Option<&'a GlobalEntity<T>>,
    parent: impl Fn(&'a GlobalEntity<T>) -> Option<&'a str>,
    resolve: impl Fn(&str) -> Option<&'a GlobalEntity<T>>,
) -> Vec<&'a GlobalEntity<T>>
where
    T: MetaEntity,
{
    let mut chain = Vec::new();
    let mut visited: HashSet<NameKey> = HashSet::new();
    let mut current = start;
    while let Some(entity) = current {
        if !visited.insert(entity.name().key()) {
            break;
        }
        chain.push(entity);
        current = parent(entity).and_then(&resolve);
    }
    chain
}
