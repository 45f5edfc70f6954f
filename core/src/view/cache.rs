//! Client-side copy of the server's todo list, keyed by id.
//!
//! Items keep insertion order, which is also display order. Every write goes
//! through the id index, so a response can touch at most the one entry that
//! carries its id and the list can never hold two entries with the same id.

use std::collections::HashMap;

use crate::types::{TodoId, TodoItem};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoCache {
    items: Vec<TodoItem>,
    index: HashMap<TodoId, usize>,
}

impl TodoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from a server listing. A repeated id keeps the position
    /// of its first occurrence and the fields of its last.
    pub fn from_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        let mut cache = Self::new();
        for item in items {
            cache.upsert(item);
        }
        cache
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &TodoId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[TodoItem] {
        &self.items
    }

    /// Replace the entry with the same id in place, or append a new one.
    pub fn upsert(&mut self, item: TodoItem) {
        match self.index.get(&item.id) {
            Some(&pos) => self.items[pos] = item,
            None => {
                self.index.insert(item.id.clone(), self.items.len());
                self.items.push(item);
            }
        }
    }

    /// Replace the entry with the same id. Unknown ids are left out; returns
    /// whether an entry changed.
    pub fn merge(&mut self, item: TodoItem) -> bool {
        match self.index.get(&item.id) {
            Some(&pos) => {
                self.items[pos] = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &TodoId) -> Option<TodoItem> {
        let pos = self.index.remove(id)?;
        let removed = self.items.remove(pos);
        for item in &self.items[pos..] {
            if let Some(slot) = self.index.get_mut(&item.id) {
                *slot -= 1;
            }
        }
        Some(removed)
    }
}
