//! Insertion-ordered, case-insensitive name map.
//!
//! Every name-keyed collection in the meta-model goes through [`NameMap`] so
//! lookups behave the same everywhere: keys are compared through
//! [`NameKey`], iteration follows first-insertion order, and re-inserting an
//! existing key replaces both the stored spelling and the value in place.

use crate::name::{Name, NameKey};
use indexmap::IndexMap;
use indexmap::map::Entry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMap<V> {
    entries: IndexMap<NameKey, (Name, V)>,
}

impl<V> Default for NameMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NameMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `value` under `name`, returning the value it replaced.
    ///
    /// A replaced entry keeps its iteration slot; the stored spelling is
    /// updated to `name`.
    pub fn insert(&mut self, name: Name, value: V) -> Option<V> {
        match self.entries.entry(name.key()) {
            Entry::Occupied(mut slot) => {
                let (_, old) = std::mem::replace(slot.get_mut(), (name, value));
                Some(old)
            }
            Entry::Vacant(slot) => {
                slot.insert((name, value));
                None
            }
        }
    }

    /// Returns the value for `name`, creating it with `make` when absent.
    /// The spelling of the first insertion is kept.
    pub fn get_or_insert_with(&mut self, name: &Name, make: impl FnOnce() -> V) -> &mut V {
        let (_, value) = self
            .entries
            .entry(name.key())
            .or_insert_with(|| (name.clone(), make()));
        value
    }

    /// Case-insensitive lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.get_entry(name).map(|(_, v)| v)
    }

    /// Case-insensitive lookup returning the stored spelling as well.
    #[must_use]
    pub fn get_entry(&self, name: &str) -> Option<(&Name, &V)> {
        self.entries
            .get(NameKey::new(name).as_str())
            .map(|(n, v)| (n, v))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.entries
            .get_mut(NameKey::new(name).as_str())
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(NameKey::new(name).as_str())
    }

    /// Removes `name`, preserving the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.entries
            .shift_remove(NameKey::new(name).as_str())
            .map(|(_, v)| v)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &V)> {
        self.entries.values().map(|(n, v)| (n, v))
    }

    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.entries.values().map(|(n, _)| n)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut().map(|(_, v)| v)
    }
}

impl<V> FromIterator<(Name, V)> for NameMap<V> {
    fn from_iter<I: IntoIterator<Item = (Name, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<V> Extend<(Name, V)> for NameMap<V> {
    fn extend<I: IntoIterator<Item = (Name, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<V> IntoIterator for NameMap<V> {
    type Item = (Name, V);
    type IntoIter = indexmap::map::IntoValues<NameKey, (Name, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}
