//! In-memory collection of trees keyed by identity.

use std::collections::BTreeMap;

use timberfall_core::EntityId;

use crate::tree::Tree;

/// Trees in the current world, ordered by id (creation order).
#[derive(Debug, Default)]
pub struct TreeRegistry {
    trees: BTreeMap<EntityId, Tree>,
}

impl TreeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tree. Returns `false` and leaves the registry untouched when
    /// the id is already present.
    pub fn insert(&mut self, tree: Tree) -> bool {
        let id = tree.id();
        if self.trees.contains_key(&id) {
            return false;
        }
        self.trees.insert(id, tree);
        true
    }

    /// Look up a tree.
    pub fn get(&self, id: EntityId) -> Option<&Tree> {
        self.trees.get(&id)
    }

    /// Look up a tree mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Tree> {
        self.trees.get_mut(&id)
    }

    /// Whether a tree with `id` is present (felled or not).
    pub fn contains(&self, id: EntityId) -> bool {
        self.trees.contains_key(&id)
    }

    /// Whether `id` exists and is still standing, i.e. may be struck.
    pub fn is_targetable(&self, id: EntityId) -> bool {
        self.trees.get(&id).is_some_and(|tree| !tree.is_felled())
    }

    /// Remove a tree, returning it so its visual can be released.
    pub fn remove(&mut self, id: EntityId) -> Option<Tree> {
        self.trees.remove(&id)
    }

    /// Number of trees present.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Iterate trees in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Tree> {
        self.trees.values()
    }

    /// Remove every tree, returning them in id order.
    pub fn drain(&mut self) -> Vec<Tree> {
        std::mem::take(&mut self.trees).into_values().collect()
    }
}
