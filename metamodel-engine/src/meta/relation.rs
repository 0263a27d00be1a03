//! Relations and their two ends.

use metamodel_types::{Name, NameMap};
use std::fmt;

use super::items::{MetaCustomProperty, MetaDeployment, MetaModifiers};
use super::simple::CollectionType;
use super::EntityHeader;

/// Attribute type of the position column added for ordered ends.
pub const ORDERING_ATTRIBUTE_TYPE: &str = "java.lang.Integer";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cardinality {
    One,
    #[default]
    Many,
}

impl Cardinality {
    /// Parses `one` / `many`; anything else is treated as `many`.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("one") => Cardinality::One,
            _ => Cardinality::Many,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cardinality::One => "one",
            Cardinality::Many => "many",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationDirection {
    Source,
    Target,
}

impl RelationDirection {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            RelationDirection::Source => RelationDirection::Target,
            RelationDirection::Target => RelationDirection::Source,
        }
    }
}

impl fmt::Display for RelationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationDirection::Source => "source",
            RelationDirection::Target => "target",
        })
    }
}

/// One side of a relation. Owned by its [`MetaRelation`]; other parts of
/// the model refer to it by `(relation, direction)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationEnd {
    pub relation: Name,
    pub direction: RelationDirection,
    /// Type declared on this end's element.
    pub owner_type: Name,
    /// Name of the collection/reference this end exposes on the opposite type.
    pub qualifier: Option<Name>,
    pub cardinality: Cardinality,
    pub navigable: bool,
    pub ordered: bool,
    pub collection_type: CollectionType,
    pub description: Option<String>,
    pub modifiers: MetaModifiers,
    pub custom_properties: NameMap<MetaCustomProperty>,
}

/// Position attribute derived from an ordered, many-valued end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingAttribute {
    /// Type whose instances are positioned.
    pub owner_type: Name,
    pub qualifier: Name,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaRelation {
    pub header: EntityHeader,
    pub localized: bool,
    pub autocreate: bool,
    pub generate: bool,
    pub description: Option<String>,
    pub deployment: Option<MetaDeployment>,
    pub source: Option<RelationEnd>,
    pub target: Option<RelationEnd>,
    pub ordering_attributes: Vec<OrderingAttribute>,
}

impl MetaRelation {
    #[must_use]
    pub fn end(&self, direction: RelationDirection) -> Option<&RelationEnd> {
        match direction {
            RelationDirection::Source => self.source.as_ref(),
            RelationDirection::Target => self.target.as_ref(),
        }
    }

    /// Many-to-many relations are stored in their own link table.
    #[must_use]
    pub fn is_many_to_many(&self) -> bool {
        matches!(
            (&self.source, &self.target),
            (Some(s), Some(t))
                if s.cardinality == Cardinality::Many && t.cardinality == Cardinality::Many
        )
    }
}
