//! Merged read views over the declarations of one global entity.
//!
//! Multi-valued children (attributes, values, properties, ...) are merged
//! across declarations in precedence order; when two declarations define
//! the same child name, the higher-precedence one is reported. Single
//! values come from the first declaration that sets them.

use metamodel_types::{NameKey, NameMap};
use std::collections::HashSet;
use std::sync::Arc;

use crate::global::GlobalEntity;
use crate::hierarchy::GENERIC_ITEM;
use crate::meta::{
    DeclarationSource, MetaAttribute, MetaBean, MetaBeanEnum, MetaBeanEnumValue, MetaBeanProperty,
    MetaCustomProperty, MetaDeployment, MetaEntity, MetaEnum, MetaEnumValue, MetaEvent, MetaHint,
    MetaIndex, MetaItem, MetaRelation, RelationDirection, RelationEnd,
};

/// An attribute together with the item declaration that defines it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeRef<'a> {
    pub attribute: &'a MetaAttribute,
    pub declaration: &'a MetaItem,
}

impl AttributeRef<'_> {
    #[must_use]
    pub fn source(&self) -> &DeclarationSource {
        self.declaration.source()
    }
}

/// A bean property together with the bean declaration that defines it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyRef<'a> {
    pub property: &'a MetaBeanProperty,
    pub declaration: &'a MetaBean,
}

impl PropertyRef<'_> {
    #[must_use]
    pub fn source(&self) -> &DeclarationSource {
        self.declaration.source()
    }
}

fn merged<'a, D: 'a, V: 'a>(
    declarations: impl Iterator<Item = &'a D>,
    children: impl Fn(&'a D) -> &'a NameMap<V>,
) -> Vec<(&'a D, &'a V)> {
    let mut seen: HashSet<NameKey> = HashSet::new();
    let mut out = Vec::new();
    for declaration in declarations {
        for (name, value) in children(declaration).iter() {
            if seen.insert(name.key()) {
                out.push((declaration, value));
            }
        }
    }
    out
}

// ── Items ────────────────────────────────────────────────────────

impl GlobalEntity<MetaItem> {
    fn items(&self) -> impl Iterator<Item = &MetaItem> {
        self.declarations().iter().map(Arc::as_ref)
    }

    /// Supertype name. Declarations that leave `extends` out inherit from
    /// [`GENERIC_ITEM`], except `GenericItem` itself.
    #[must_use]
    pub fn extends(&self) -> Option<&str> {
        match self.items().find_map(|d| d.extends.as_ref()) {
            Some(name) => Some(name.as_str()),
            None if self.name().eq_ignore_case(GENERIC_ITEM) => None,
            None => Some(GENERIC_ITEM),
        }
    }

    #[must_use]
    pub fn attributes(&self) -> Vec<AttributeRef<'_>> {
        merged(self.items(), |d| &d.attributes)
            .into_iter()
            .map(|(declaration, attribute)| AttributeRef {
                attribute,
                declaration,
            })
            .collect()
    }

    #[must_use]
    pub fn find_attribute(&self, qualifier: &str) -> Option<AttributeRef<'_>> {
        self.items().find_map(|declaration| {
            declaration
                .attribute(qualifier)
                .map(|attribute| AttributeRef {
                    attribute,
                    declaration,
                })
        })
    }

    /// Every declaration of `qualifier`, highest precedence first.
    #[must_use]
    pub fn attribute_declarations(&self, qualifier: &str) -> Vec<AttributeRef<'_>> {
        self.items()
            .filter_map(|declaration| {
                declaration
                    .attribute(qualifier)
                    .map(|attribute| AttributeRef {
                        attribute,
                        declaration,
                    })
            })
            .collect()
    }

    #[must_use]
    pub fn custom_properties(&self) -> Vec<&MetaCustomProperty> {
        merged(self.items(), |d| &d.custom_properties)
            .into_iter()
            .map(|(_, p)| p)
            .collect()
    }

    #[must_use]
    pub fn indexes(&self) -> Vec<&MetaIndex> {
        merged(self.items(), |d| &d.indexes)
            .into_iter()
            .map(|(_, i)| i)
            .collect()
    }

    #[must_use]
    pub fn deployment(&self) -> Option<&MetaDeployment> {
        self.items().find_map(|d| d.deployment.as_ref())
    }

    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.items().find_map(|d| d.is_abstract).unwrap_or(false)
    }

    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.items().find_map(|d| d.singleton).unwrap_or(false)
    }

    #[must_use]
    pub fn autocreate(&self) -> bool {
        self.items().find_map(|d| d.autocreate).unwrap_or(true)
    }

    #[must_use]
    pub fn generate(&self) -> bool {
        self.items().find_map(|d| d.generate).unwrap_or(true)
    }
}

// ── Enums ────────────────────────────────────────────────────────

impl GlobalEntity<MetaEnum> {
    #[must_use]
    pub fn values(&self) -> Vec<&MetaEnumValue> {
        merged(self.declarations().iter().map(Arc::as_ref), |d| &d.values)
            .into_iter()
            .map(|(_, v)| v)
            .collect()
    }

    #[must_use]
    pub fn find_value(&self, code: &str) -> Option<&MetaEnumValue> {
        self.declarations().iter().find_map(|d| d.values.get(code))
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.declarations()
            .iter()
            .find_map(|d| d.dynamic)
            .unwrap_or(false)
    }
}

impl GlobalEntity<MetaBeanEnum> {
    #[must_use]
    pub fn values(&self) -> Vec<&MetaBeanEnumValue> {
        merged(self.declarations().iter().map(Arc::as_ref), |d| &d.values)
            .into_iter()
            .map(|(_, v)| v)
            .collect()
    }
}

// ── Relations ────────────────────────────────────────────────────

impl GlobalEntity<MetaRelation> {
    /// End on `direction` taken from the highest-precedence declaration
    /// that declares it.
    #[must_use]
    pub fn end(&self, direction: RelationDirection) -> Option<&RelationEnd> {
        self.declarations().iter().find_map(|d| d.end(direction))
    }
}

// ── Beans and events ─────────────────────────────────────────────

fn bean_extends<'a>(mut beans: impl Iterator<Item = &'a MetaBean>) -> Option<&'a str> {
    beans.find_map(|b| b.extends.as_deref())
}

fn bean_properties<'a>(beans: impl Iterator<Item = &'a MetaBean>) -> Vec<PropertyRef<'a>> {
    merged(beans, |b| &b.properties)
        .into_iter()
        .map(|(declaration, property)| PropertyRef {
            property,
            declaration,
        })
        .collect()
}

fn bean_property<'a>(
    mut beans: impl Iterator<Item = &'a MetaBean>,
    name: &str,
) -> Option<PropertyRef<'a>> {
    beans.find_map(|declaration| {
        declaration
            .properties
            .get(name)
            .map(|property| PropertyRef {
                property,
                declaration,
            })
    })
}

fn bean_hints<'a>(beans: impl Iterator<Item = &'a MetaBean>) -> Vec<&'a MetaHint> {
    merged(beans, |b| &b.hints)
        .into_iter()
        .map(|(_, h)| h)
        .collect()
}

macro_rules! bean_views {
    ($ty:ty, $deref:path) => {
        impl GlobalEntity<$ty> {
            fn beans(&self) -> impl Iterator<Item = &MetaBean> {
                self.declarations().iter().map($deref)
            }

            /// Raw supertype as declared, generic arguments included.
            #[must_use]
            pub fn extends(&self) -> Option<&str> {
                bean_extends(self.beans())
            }

            /// Supertype class with generic arguments stripped.
            #[must_use]
            pub fn extends_class(&self) -> Option<&str> {
                self.beans().find_map(MetaBean::extends_class)
            }

            #[must_use]
            pub fn properties(&self) -> Vec<PropertyRef<'_>> {
                bean_properties(self.beans())
            }

            #[must_use]
            pub fn find_property(&self, name: &str) -> Option<PropertyRef<'_>> {
                bean_property(self.beans(), name)
            }

            #[must_use]
            pub fn hints(&self) -> Vec<&MetaHint> {
                bean_hints(self.beans())
            }

            #[must_use]
            pub fn is_abstract(&self) -> bool {
                self.beans().find_map(|b| b.is_abstract).unwrap_or(false)
            }

            #[must_use]
            pub fn is_deprecated(&self) -> bool {
                self.beans().find_map(|b| b.deprecated).unwrap_or(false)
            }
        }
    };
}

fn bean_of(bean: &Arc<MetaBean>) -> &MetaBean {
    bean
}

fn event_bean(event: &Arc<MetaEvent>) -> &MetaBean {
    &event.0
}

bean_views!(MetaBean, bean_of);
bean_views!(MetaEvent, event_bean);

