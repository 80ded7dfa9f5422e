//! A stable bijection between item names and dense integer ids.

use std::collections::HashMap;

use crate::{Error, Result};

/// Stores item names and associates a dense non-negative id with each.
///
/// Ids are assigned in insertion order starting at 0 and are stable until
/// [`Self::clear`], which makes them suitable for indexing vectors without
/// wasting space. Lookups are O(1) in both directions. Not internally
/// synchronised; share behind a lock if shared at all.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct NameRegistry {
    /// The id of each name.
    ids_by_name: HashMap<String, usize>,
    /// The name of each id; the id is the index.
    names_by_id: Vec<String>,
}

impl NameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name and returns its id.
    ///
    /// Adding a name that is already present returns its existing id.
    pub fn add(&mut self, name: &str) -> usize {
        if let Some(&id) = self.ids_by_name.get(name) {
            return id;
        }
        let id = self.names_by_id.len();
        self.names_by_id.push(name.to_string());
        self.ids_by_name.insert(name.to_string(), id);
        id
    }

    /// The id of the given name.
    ///
    /// # Errors
    ///
    /// `UnknownName` if the name was never added.
    pub fn id_of(&self, name: &str) -> Result<usize> {
        self.ids_by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownName(name.to_string()))
    }

    /// The name with the given id.
    ///
    /// # Errors
    ///
    /// `UnknownId` if the id was never assigned.
    pub fn name_of(&self, id: usize) -> Result<&str> {
        self.names_by_id
            .get(id)
            .map(String::as_str)
            .ok_or(Error::UnknownId(id))
    }

    /// The number of names stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names_by_id.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names_by_id.is_empty()
    }

    /// Removes every name, invalidating all previously returned ids.
    pub fn clear(&mut self) {
        self.ids_by_name.clear();
        self.names_by_id.clear();
    }

    /// Iterates over the names in id order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names_by_id.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::NameRegistry;
    use crate::{Error, Result};

    #[test]
    fn ids_follow_insertion_order() -> Result<()> {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.add("1cukA01"), 0);
        assert_eq!(registry.add("1bvsA01"), 1);
        assert_eq!(registry.add("1hvxA00"), 2);
        assert_eq!(registry.id_of("1bvsA01")?, 1);
        assert_eq!(registry.name_of(2)?, "1hvxA00");
        Ok(())
    }

    #[test]
    fn re_adding_returns_the_existing_id() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.add("1cukA01"), registry.add("1cukA01"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn round_trips_names_through_ids() -> Result<()> {
        let mut registry = NameRegistry::new();
        for name in ["alpha", "beta", "gamma"] {
            let id = registry.add(name);
            assert_eq!(registry.name_of(id)?, name);
            assert_eq!(registry.id_of(registry.name_of(id)?)?, id);
        }
        Ok(())
    }

    #[test]
    fn clear_empties_the_registry() {
        let mut registry = NameRegistry::new();
        registry.add("alpha");
        registry.add("beta");
        registry.clear();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
        assert!(matches!(registry.id_of("alpha"), Err(Error::UnknownName(_))));
        assert!(matches!(registry.name_of(0), Err(Error::UnknownId(0))));
    }
}
