//! Type-system declaration nodes (`items` documents).

use serde::{Deserialize, Serialize};

/// Root of a type-system document. Lists keep document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemsDecl {
    pub atomic_types: Vec<AtomicTypeNode>,
    pub collection_types: Vec<CollectionTypeNode>,
    pub enum_types: Vec<EnumTypeNode>,
    pub map_types: Vec<MapTypeNode>,
    pub relations: Vec<RelationNode>,
    pub item_types: Vec<ItemTypeNode>,
    /// Item types grouped for readability; semantically the same as
    /// top-level item types declared after `item_types`.
    pub type_groups: Vec<TypeGroupNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomicTypeNode {
    pub class: Option<String>,
    pub extends: Option<String>,
    pub autocreate: Option<bool>,
    pub generate: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionTypeNode {
    pub code: Option<String>,
    pub element_type: Option<String>,
    /// `collection`, `set` or `list`.
    #[serde(rename = "type")]
    pub collection_type: Option<String>,
    pub autocreate: Option<bool>,
    pub generate: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapTypeNode {
    pub code: Option<String>,
    pub argument_type: Option<String>,
    pub return_type: Option<String>,
    pub autocreate: Option<bool>,
    pub generate: Option<bool>,
    pub redeclare: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumTypeNode {
    pub code: Option<String>,
    pub dynamic: Option<bool>,
    pub autocreate: Option<bool>,
    pub generate: Option<bool>,
    pub jalo_class: Option<String>,
    pub description: Option<String>,
    pub values: Vec<EnumValueNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumValueNode {
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationNode {
    pub code: Option<String>,
    pub localized: Option<bool>,
    pub autocreate: Option<bool>,
    pub generate: Option<bool>,
    pub description: Option<String>,
    pub deployment: Option<DeploymentNode>,
    pub source_element: Option<RelationElementNode>,
    pub target_element: Option<RelationElementNode>,
}

/// One side of a relation declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationElementNode {
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub qualifier: Option<String>,
    /// `one` or `many`.
    pub cardinality: Option<String>,
    pub navigable: Option<bool>,
    pub ordered: Option<bool>,
    pub collection_type: Option<String>,
    pub description: Option<String>,
    pub modifiers: Option<ModifiersNode>,
    pub custom_properties: Vec<CustomPropertyNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTypeNode {
    pub code: Option<String>,
    pub extends: Option<String>,
    pub jalo_class: Option<String>,
    pub metatype: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "abstract")]
    pub is_abstract: Option<bool>,
    pub autocreate: Option<bool>,
    pub generate: Option<bool>,
    pub singleton: Option<bool>,
    pub jalo_only: Option<bool>,
    pub deployment: Option<DeploymentNode>,
    pub custom_properties: Vec<CustomPropertyNode>,
    pub attributes: Vec<AttributeNode>,
    pub indexes: Vec<IndexNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeGroupNode {
    pub name: Option<String>,
    pub item_types: Vec<ItemTypeNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentNode {
    pub table: Option<String>,
    pub typecode: Option<String>,
    pub properties_table: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeNode {
    pub qualifier: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub redeclare: Option<bool>,
    pub autocreate: Option<bool>,
    pub generate: Option<bool>,
    pub description: Option<String>,
    pub default_value: Option<String>,
    pub persistence: Option<PersistenceNode>,
    pub modifiers: Option<ModifiersNode>,
    pub custom_properties: Vec<CustomPropertyNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceNode {
    /// `property`, `cmp`, `jalo` or `dynamic`.
    #[serde(rename = "type")]
    pub persistence_type: Option<String>,
    pub qualifier: Option<String>,
    pub attribute_handler: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifiersNode {
    pub read: Option<bool>,
    pub write: Option<bool>,
    pub search: Option<bool>,
    pub optional: Option<bool>,
    pub private: Option<bool>,
    pub initial: Option<bool>,
    pub remove: Option<bool>,
    pub unique: Option<bool>,
    pub part_of: Option<bool>,
    pub encrypted: Option<bool>,
    pub do_not_optimize: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomPropertyNode {
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexNode {
    pub name: Option<String>,
    pub unique: Option<bool>,
    pub replace: Option<bool>,
    pub remove: Option<bool>,
    pub keys: Vec<IndexKeyNode>,
    pub include: Vec<IndexKeyNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexKeyNode {
    pub attribute: Option<String>,
    pub lower: Option<bool>,
}

// Shorthand constructors used by collaborators that synthesize declarations.

impl ItemTypeNode {
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn extending(mut self, supertype: &str) -> Self {
        self.extends = Some(supertype.to_string());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeNode) -> Self {
        self.attributes.push(attribute);
        self
    }
}

impl AttributeNode {
    #[must_use]
    pub fn new(qualifier: &str, type_name: &str) -> Self {
        Self {
            qualifier: Some(qualifier.to_string()),
            type_name: Some(type_name.to_string()),
            ..Default::default()
        }
    }
}

impl EnumTypeNode {
    #[must_use]
    pub fn new(code: &str, values: &[&str]) -> Self {
        Self {
            code: Some(code.to_string()),
            values: values
                .iter()
                .map(|v| EnumValueNode {
                    code: Some((*v).to_string()),
                    description: None,
                })
                .collect(),
            ..Default::default()
        }
    }
}

impl RelationElementNode {
    #[must_use]
    pub fn new(type_name: &str, qualifier: &str, cardinality: &str) -> Self {
        Self {
            type_name: Some(type_name.to_string()),
            qualifier: Some(qualifier.to_string()),
            cardinality: Some(cardinality.to_string()),
            ..Default::default()
        }
    }
}

impl RelationNode {
    #[must_use]
    pub fn new(code: &str, source: RelationElementNode, target: RelationElementNode) -> Self {
        Self {
            code: Some(code.to_string()),
            source_element: Some(source),
            target_element: Some(target),
            ..Default::default()
        }
    }
}
