//! Declaration names.
//!
//! Declarations are looked up case-insensitively but keep the spelling of
//! the declaration that introduced them, so a name is split into the
//! displayed [`Name`] and the normalized [`NameKey`] used for hashing.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A trimmed, non-blank declaration name with its original casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Trims `raw` and returns a name, or `None` if nothing is left.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the name as written in the declaration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the case-insensitive lookup key for this name.
    #[must_use]
    pub fn key(&self) -> NameKey {
        NameKey::new(&self.0)
    }

    /// Compares two names ignoring case.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.key() == NameKey::new(other)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "name must not be blank".to_string())
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

/// Normalized (trimmed, lower-cased) form of a name used as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameKey(String);

impl NameKey {
    /// Normalizes an arbitrary lookup string.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NameKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Name> for NameKey {
    fn from(name: &Name) -> Self {
        name.key()
    }
}
