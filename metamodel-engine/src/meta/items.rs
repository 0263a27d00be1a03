//! Item and enum entities of the type-system family.

use metamodel_types::{Name, NameMap};

use super::EntityHeader;

/// An item type declaration.
///
/// Item-level flags stay optional: extension documents routinely redeclare
/// an item only to add attributes and leave the flags out, so the merged
/// view must be able to tell "declared false" from "not declared".
#[derive(Debug, Clone, PartialEq)]
pub struct MetaItem {
    pub header: EntityHeader,
    pub extends: Option<Name>,
    pub jalo_class: Option<String>,
    pub metatype: Option<String>,
    pub description: Option<String>,
    pub is_abstract: Option<bool>,
    pub autocreate: Option<bool>,
    pub generate: Option<bool>,
    pub singleton: Option<bool>,
    pub jalo_only: Option<bool>,
    pub deployment: Option<MetaDeployment>,
    pub custom_properties: NameMap<MetaCustomProperty>,
    pub attributes: NameMap<MetaAttribute>,
    pub indexes: NameMap<MetaIndex>,
}

impl MetaItem {
    #[must_use]
    pub fn attribute(&self, qualifier: &str) -> Option<&MetaAttribute> {
        self.attributes.get(qualifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaDeployment {
    pub table: Option<String>,
    pub typecode: Option<String>,
    pub properties_table: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaAttribute {
    pub qualifier: Name,
    pub type_name: Option<String>,
    pub redeclare: bool,
    pub autocreate: bool,
    pub generate: bool,
    pub description: Option<String>,
    pub default_value: Option<String>,
    pub persistence: Option<MetaPersistence>,
    pub modifiers: MetaModifiers,
    pub custom_properties: NameMap<MetaCustomProperty>,
}

impl MetaAttribute {
    /// Dynamic attributes are computed by a handler and have no column.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.persistence
            .as_ref()
            .and_then(|p| p.persistence_type.as_deref())
            .is_some_and(|t| t.eq_ignore_ascii_case("dynamic"))
    }

    #[must_use]
    pub fn is_localized(&self) -> bool {
        self.type_name
            .as_deref()
            .is_some_and(|t| t.trim().starts_with("localized:"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaPersistence {
    pub persistence_type: Option<String>,
    pub qualifier: Option<String>,
    pub attribute_handler: Option<String>,
}

/// Attribute modifiers with the platform defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaModifiers {
    pub read: bool,
    pub write: bool,
    pub search: bool,
    pub optional: bool,
    pub private: bool,
    pub initial: bool,
    pub remove: bool,
    pub unique: bool,
    pub part_of: bool,
    pub encrypted: bool,
    pub do_not_optimize: bool,
}

impl Default for MetaModifiers {
    fn default() -> Self {
        Self {
            read: true,
            write: true,
            search: true,
            optional: true,
            private: false,
            initial: false,
            remove: true,
            unique: false,
            part_of: false,
            encrypted: false,
            do_not_optimize: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaCustomProperty {
    pub name: Name,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaIndex {
    pub name: Name,
    pub unique: bool,
    pub replace: bool,
    pub remove: bool,
    pub keys: Vec<MetaIndexKey>,
    pub include: Vec<MetaIndexKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaIndexKey {
    pub attribute: Name,
    pub lower: bool,
}

/// An enum type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaEnum {
    pub header: EntityHeader,
    pub dynamic: Option<bool>,
    pub autocreate: Option<bool>,
    pub generate: Option<bool>,
    pub jalo_class: Option<String>,
    pub description: Option<String>,
    pub values: NameMap<MetaEnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaEnumValue {
    pub code: Name,
    pub description: Option<String>,
}
