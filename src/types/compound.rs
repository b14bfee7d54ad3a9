//! Keyed, heterogeneous container of named tags.

use std::mem;

use indexmap::IndexMap;

use super::deep::{self, drop_nested};
use super::{Tag, TagKind};
use crate::error::ValidationError;

/// A mapping from unique UTF-8 keys to tags of any kind.
///
/// Entries keep their insertion order, which is also the order they are
/// written in. Equality ignores order.
#[derive(Debug, Default)]
pub struct CompoundTag {
    entries: IndexMap<String, Tag>,
}

impl CompoundTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.entries.get_mut(key)
    }

    /// Sets `key` to `value`, returning the value it replaced.
    ///
    /// An existing key keeps its position. Keys longer than 65535 UTF-8
    /// bytes are rejected.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Tag>,
    ) -> Result<Option<Tag>, ValidationError> {
        let key = key.into();
        ValidationError::check_str_len(TagKind::String, &key)?;
        Ok(self.entries.insert(key, value.into()))
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Result<Tag, ValidationError> {
        self.entries
            .shift_remove(key)
            .ok_or_else(|| ValidationError::KeyNotFound(key.to_owned()))
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Tag> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Tag> {
        self.entries.values()
    }

    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts under a key whose length was already checked.
    pub(super) fn insert_unchecked(&mut self, key: String, value: Tag) {
        self.entries.insert(key, value);
    }

    pub(super) fn drain_into(&mut self, out: &mut Vec<Tag>) {
        out.extend(self.entries.drain(..).map(|(_, v)| v));
    }
}

impl Drop for CompoundTag {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            drop_nested(mem::take(&mut self.entries).into_values().collect());
        }
    }
}

impl Clone for CompoundTag {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl PartialEq for CompoundTag {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = Vec::new();
        deep::push_entry_pairs(self, other, &mut pending) && deep::tags_eq(pending)
    }
}

impl<'a> IntoIterator for &'a CompoundTag {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
