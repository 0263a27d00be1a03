//! Entity kinds of the two declaration families.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The declaration family a document (and every entity in it) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Item, enum, relation, collection, map and atomic declarations.
    TypeSystem,
    /// Bean, event and bean-enum declarations.
    BeanSystem,
}

/// One top-level entity kind.
///
/// Names are unique per kind only: an item and a relation may share a name
/// without interfering with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaKind {
    Item,
    Enum,
    Relation,
    Collection,
    Map,
    Atomic,
    Bean,
    Event,
    BeanEnum,
}

impl MetaKind {
    /// Every kind, type family first.
    pub const ALL: [MetaKind; 9] = [
        MetaKind::Item,
        MetaKind::Enum,
        MetaKind::Relation,
        MetaKind::Collection,
        MetaKind::Map,
        MetaKind::Atomic,
        MetaKind::Bean,
        MetaKind::Event,
        MetaKind::BeanEnum,
    ];

    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            MetaKind::Item
            | MetaKind::Enum
            | MetaKind::Relation
            | MetaKind::Collection
            | MetaKind::Map
            | MetaKind::Atomic => Family::TypeSystem,
            MetaKind::Bean | MetaKind::Event | MetaKind::BeanEnum => Family::BeanSystem,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetaKind::Item => "item",
            MetaKind::Enum => "enum",
            MetaKind::Relation => "relation",
            MetaKind::Collection => "collection",
            MetaKind::Map => "map",
            MetaKind::Atomic => "atomic",
            MetaKind::Bean => "bean",
            MetaKind::Event => "event",
            MetaKind::BeanEnum => "bean_enum",
        }
    }
}

impl fmt::Display for MetaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MetaKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}
