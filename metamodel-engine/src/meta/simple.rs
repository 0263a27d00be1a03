//! Collection, map and atomic types.

use std::fmt;

use super::EntityHeader;

/// Java collection flavour backing a collection type or relation end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CollectionType {
    #[default]
    Collection,
    Set,
    List,
}

impl CollectionType {
    /// Parses the declared flavour; unknown or absent values fall back to
    /// [`CollectionType::Collection`].
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("set") => CollectionType::Set,
            Some(s) if s.eq_ignore_ascii_case("list") => CollectionType::List,
            _ => CollectionType::Collection,
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CollectionType::Collection => "collection",
            CollectionType::Set => "set",
            CollectionType::List => "list",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaCollection {
    pub header: EntityHeader,
    pub element_type: Option<String>,
    pub collection_type: CollectionType,
    pub autocreate: bool,
    pub generate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaMap {
    pub header: EntityHeader,
    pub argument_type: Option<String>,
    pub return_type: Option<String>,
    pub autocreate: bool,
    pub generate: bool,
    pub redeclare: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaAtomic {
    pub header: EntityHeader,
    pub extends: Option<String>,
    pub autocreate: bool,
    pub generate: bool,
}
