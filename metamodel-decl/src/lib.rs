//! Parsed declaration trees.
//!
//! This crate is the input contract of the engine. An external parser turns
//! each declaration file into a [`DeclarationDocument`]; the engine only ever
//! reads these values. Every attribute a parser may fail to fill is optional,
//! because documents are routinely read while they are half-edited.
//!
//! - [`DeclarationDocument`]: envelope: identity, module, custom flag, stamp
//! - [`ItemsDecl`]: the type-system family (items, enums, relations, ...)
//! - [`BeansDecl`]: the bean-system family (beans, events, bean enums)
//! - [`DeclarationNode`]: borrowed sum type over every node variant

mod beans;
mod document;
mod error;
mod items;
mod node;

pub use beans::{
    AnnotationNode, BeanEnumNode, BeanEnumValueNode, BeanNode, BeansDecl, HintNode, ImportNode,
    PropertyNode,
};
pub use document::{DeclarationDocument, DeclarationRoot};
pub use error::{DeclError, DeclResult};
pub use items::{
    AtomicTypeNode, AttributeNode, CollectionTypeNode, CustomPropertyNode, DeploymentNode,
    EnumTypeNode, EnumValueNode, IndexKeyNode, IndexNode, ItemTypeNode, ItemsDecl, MapTypeNode,
    ModifiersNode, PersistenceNode, RelationElementNode, RelationNode, TypeGroupNode,
};
pub use node::DeclarationNode;
