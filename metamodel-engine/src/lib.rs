//! Meta-model aggregation engine.
//!
//! Turns parsed declaration documents into one queryable type graph:
//!
//! 1. [`extract_name`]: canonical name of a single declaration node
//! 2. [`LocalModelBuilder`]: one [`LocalMetaModel`] per document revision
//! 3. [`merge`]: all local models folded into a [`GlobalMetaModel`], custom
//!    declarations ahead of out-of-the-box ones, relation ends indexed by
//!    the type they can be navigated from
//!
//! Everything here is synchronous and pure; caching and scheduling live in
//! `metamodel-access`.
//!
//! # Example
//!
//! ```
//! use metamodel_decl::{AttributeNode, DeclarationDocument, ItemTypeNode, ItemsDecl};
//! use metamodel_engine::{merge, LocalModelBuilder, MetaItem};
//! use metamodel_types::{DocumentId, ModuleName};
//! use std::sync::Arc;
//!
//! let doc = DeclarationDocument::type_system(
//!     DocumentId::new("core-items.xml").unwrap(),
//!     ModuleName::new("core").unwrap(),
//!     false,
//!     ItemsDecl {
//!         item_types: vec![ItemTypeNode::new("Product")
//!             .with_attribute(AttributeNode::new("code", "java.lang.String"))],
//!         ..Default::default()
//!     },
//! );
//!
//! let local = Arc::new(LocalModelBuilder::build_document(&doc));
//! let global = merge(&[local]);
//! let product = global.find::<MetaItem>("PRODUCT").unwrap();
//! assert!(product.find_attribute("code").is_some());
//! ```

mod builder;
mod global;
mod hierarchy;
mod local;
mod merge;
pub mod meta;
mod name_provider;
mod views;

pub use builder::LocalModelBuilder;
pub use global::{
    AnyGlobalEntity, GlobalEntity, GlobalEntityRef, GlobalMetaModel, RelationEndRef,
};
pub use hierarchy::GENERIC_ITEM;
pub use local::LocalMetaModel;
pub use merge::merge;
pub use meta::{
    AnnotationScope, Cardinality, CollectionType, DeclarationSource, EntityHeader, MetaAnnotation,
    MetaAtomic, MetaAttribute, MetaBean, MetaBeanEnum, MetaBeanEnumValue, MetaBeanProperty,
    MetaCollection, MetaCustomProperty, MetaDeployment, MetaEntity, MetaEnum, MetaEnumValue,
    MetaEvent, MetaHint, MetaImport, MetaIndex, MetaIndexKey, MetaItem, MetaMap, MetaModifiers,
    MetaPersistence, MetaRelation, ORDERING_ATTRIBUTE_TYPE, OrderingAttribute, RelationDirection,
    RelationEnd,
};
pub use name_provider::extract_name;
pub use views::{AttributeRef, PropertyRef};
