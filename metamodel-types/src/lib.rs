//! Core value types for the declaration meta-model engine.
//!
//! This crate defines the small, family-agnostic vocabulary every other layer
//! shares:
//! - [`Name`] / [`NameKey`]: trimmed declaration names and their
//!   case-insensitive lookup key
//! - [`NameMap`]: insertion-ordered map keyed case-insensitively
//! - [`DocumentId`], [`DocumentStamp`], [`ModuleName`]: where a declaration
//!   came from and which revision of it was read
//! - [`MetaKind`] / [`Family`]: the entity kinds of both declaration families

mod ids;
mod kind;
mod name;
mod name_map;

pub use ids::{DocumentId, DocumentStamp, ModuleName};
pub use kind::{Family, MetaKind};
pub use name::{Name, NameKey};
pub use name_map::NameMap;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing core values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    #[error("document id must not be blank")]
    BlankDocumentId,

    #[error("module name must not be blank")]
    BlankModuleName,
}
