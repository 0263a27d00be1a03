//! Borrowed view over every declaration node variant.
//!
//! The engine dispatches on this enum instead of on the concrete node
//! structs, so adding a node variant forces every `match` over it to be
//! revisited.

use crate::beans::{
    AnnotationNode, BeanEnumNode, BeanEnumValueNode, BeanNode, HintNode, ImportNode, PropertyNode,
};
use crate::items::{
    AtomicTypeNode, AttributeNode, CollectionTypeNode, CustomPropertyNode, EnumTypeNode,
    EnumValueNode, IndexNode, ItemTypeNode, MapTypeNode, RelationElementNode, RelationNode,
};

#[derive(Debug, Clone, Copy)]
pub enum DeclarationNode<'a> {
    Atomic(&'a AtomicTypeNode),
    Collection(&'a CollectionTypeNode),
    Map(&'a MapTypeNode),
    Enum(&'a EnumTypeNode),
    EnumValue(&'a EnumValueNode),
    Relation(&'a RelationNode),
    RelationElement(&'a RelationElementNode),
    Item(&'a ItemTypeNode),
    Attribute(&'a AttributeNode),
    CustomProperty(&'a CustomPropertyNode),
    Index(&'a IndexNode),
    Bean(&'a BeanNode),
    Event(&'a BeanNode),
    BeanEnum(&'a BeanEnumNode),
    BeanEnumValue(&'a BeanEnumValueNode),
    Property(&'a PropertyNode),
    Hint(&'a HintNode),
    Annotation(&'a AnnotationNode),
    Import(&'a ImportNode),
}

impl DeclarationNode<'_> {
    /// Raw value of the attribute that names this node, before trimming.
    #[must_use]
    pub fn name_attribute(&self) -> Option<&str> {
        let raw = match self {
            DeclarationNode::Atomic(n) => &n.class,
            DeclarationNode::Collection(n) => &n.code,
            DeclarationNode::Map(n) => &n.code,
            DeclarationNode::Enum(n) => &n.code,
            DeclarationNode::EnumValue(n) => &n.code,
            DeclarationNode::Relation(n) => &n.code,
            DeclarationNode::RelationElement(n) => &n.qualifier,
            DeclarationNode::Item(n) => &n.code,
            DeclarationNode::Attribute(n) => &n.qualifier,
            DeclarationNode::CustomProperty(n) => &n.name,
            DeclarationNode::Index(n) => &n.name,
            DeclarationNode::Bean(n) | DeclarationNode::Event(n) => &n.class,
            DeclarationNode::BeanEnum(n) => &n.class,
            DeclarationNode::BeanEnumValue(n) => &n.value,
            DeclarationNode::Property(n) => &n.name,
            DeclarationNode::Hint(n) => &n.name,
            DeclarationNode::Annotation(n) => &n.value,
            DeclarationNode::Import(n) => &n.type_name,
        };
        raw.as_deref()
    }

    /// Short label of the variant, used in log fields.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DeclarationNode::Atomic(_) => "atomic",
            DeclarationNode::Collection(_) => "collection",
            DeclarationNode::Map(_) => "map",
            DeclarationNode::Enum(_) => "enum",
            DeclarationNode::EnumValue(_) => "enum-value",
            DeclarationNode::Relation(_) => "relation",
            DeclarationNode::RelationElement(_) => "relation-element",
            DeclarationNode::Item(_) => "item",
            DeclarationNode::Attribute(_) => "attribute",
            DeclarationNode::CustomProperty(_) => "custom-property",
            DeclarationNode::Index(_) => "index",
            DeclarationNode::Bean(_) => "bean",
            DeclarationNode::Event(_) => "event",
            DeclarationNode::BeanEnum(_) => "bean-enum",
            DeclarationNode::BeanEnumValue(_) => "bean-enum-value",
            DeclarationNode::Property(_) => "property",
            DeclarationNode::Hint(_) => "hint",
            DeclarationNode::Annotation(_) => "annotation",
            DeclarationNode::Import(_) => "import",
        }
    }
}
