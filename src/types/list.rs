//! Indexed, homogeneously typed sequences: `ListTag` and `IntArrayTag`.

use std::mem;

use super::deep::{self, drop_nested};
use super::tag::check_i32;
use super::{CompoundTag, Tag, TagKind};
use crate::error::ValidationError;

/// An ordered list of tags that all share one element kind.
///
/// The element kind is fixed at construction. A list declared with
/// [`TagKind::End`] can only ever be empty.
///
/// Equality, cloning and dropping work at any depth; `Debug` output recurses.
#[derive(Debug)]
pub struct ListTag {
    element_kind: TagKind,
    items: Vec<Tag>,
}

impl ListTag {
    /// Creates an empty list holding `element_kind` tags.
    pub fn new(element_kind: TagKind) -> Self {
        Self {
            element_kind,
            items: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(element_kind: TagKind, capacity: usize) -> Self {
        Self {
            element_kind,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Creates a list from `items`, validating every element's kind.
    pub fn with_items(
        element_kind: TagKind,
        items: impl IntoIterator<Item = Tag>,
    ) -> Result<Self, ValidationError> {
        let mut list = Self::new(element_kind);
        for item in items {
            list.push(item)?;
        }
        Ok(list)
    }

    pub fn element_kind(&self) -> TagKind {
        self.element_kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    /// Mutable access to a Compound element, for in-place nested edits.
    pub fn get_compound_mut(&mut self, index: usize) -> Option<&mut CompoundTag> {
        self.items.get_mut(index).and_then(Tag::as_compound_mut)
    }

    /// Mutable access to a List element, for in-place nested edits.
    pub fn get_list_mut(&mut self, index: usize) -> Option<&mut ListTag> {
        self.items.get_mut(index).and_then(Tag::as_list_mut)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.items
    }

    /// Appends `tag`; fails without modifying the list on a kind mismatch.
    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<(), ValidationError> {
        let tag = self.validate(tag.into())?;
        ValidationError::check_seq_len(TagKind::List, self.items.len() + 1)?;
        self.items.push(tag);
        Ok(())
    }

    pub fn insert(&mut self, index: usize, tag: impl Into<Tag>) -> Result<(), ValidationError> {
        let tag = self.validate(tag.into())?;
        if index > self.items.len() {
            return Err(ValidationError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        ValidationError::check_seq_len(TagKind::List, self.items.len() + 1)?;
        self.items.insert(index, tag);
        Ok(())
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag, ValidationError> {
        let tag = self.validate(tag.into())?;
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(ValidationError::IndexOutOfBounds { index, len })?;
        Ok(mem::replace(slot, tag))
    }

    pub fn remove(&mut self, index: usize) -> Result<Tag, ValidationError> {
        if index >= self.items.len() {
            return Err(ValidationError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn pop(&mut self) -> Option<Tag> {
        self.items.pop()
    }

    pub fn into_vec(mut self) -> Vec<Tag> {
        mem::take(&mut self.items)
    }

    fn validate(&self, tag: Tag) -> Result<Tag, ValidationError> {
        if tag.kind() != self.element_kind {
            return Err(ValidationError::WrongElementKind {
                expected: self.element_kind,
                found: tag.kind(),
            });
        }
        Ok(tag)
    }

    /// Appends an element already known to match the element kind.
    pub(super) fn push_unchecked(&mut self, tag: Tag) {
        self.items.push(tag);
    }

    pub(super) fn drain_into(&mut self, out: &mut Vec<Tag>) {
        out.append(&mut self.items);
    }
}

impl Clone for ListTag {
    fn clone(&self) -> Self {
        Self {
            element_kind: self.element_kind,
            items: self.items.clone(),
        }
    }
}

impl PartialEq for ListTag {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = Vec::new();
        deep::push_item_pairs(self, other, &mut pending) && deep::tags_eq(pending)
    }
}

impl Drop for ListTag {
    fn drop(&mut self) {
        if !self.items.is_empty() {
            drop_nested(mem::take(&mut self.items));
        }
    }
}

impl<'a> IntoIterator for &'a ListTag {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An ordered sequence of 32-bit signed integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IntArrayTag(Vec<i32>);

impl IntArrayTag {
    pub fn new(values: impl Into<Vec<i32>>) -> Result<Self, ValidationError> {
        let values = values.into();
        ValidationError::check_seq_len(TagKind::IntArray, values.len())?;
        Ok(Self(values))
    }

    /// Builds an array from wider integers, range-checking each one.
    pub fn from_wide(values: impl IntoIterator<Item = i64>) -> Result<Self, ValidationError> {
        let values = values
            .into_iter()
            .map(|v| check_i32(TagKind::IntArray, v))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<i32> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn push(&mut self, value: i32) -> Result<(), ValidationError> {
        ValidationError::check_seq_len(TagKind::IntArray, self.0.len() + 1)?;
        self.0.push(value);
        Ok(())
    }

    pub fn push_wide(&mut self, value: i64) -> Result<(), ValidationError> {
        self.push(check_i32(TagKind::IntArray, value)?)
    }

    pub fn insert(&mut self, index: usize, value: i32) -> Result<(), ValidationError> {
        if index > self.0.len() {
            return Err(ValidationError::IndexOutOfBounds {
                index,
                len: self.0.len(),
            });
        }
        ValidationError::check_seq_len(TagKind::IntArray, self.0.len() + 1)?;
        self.0.insert(index, value);
        Ok(())
    }

    /// Replaces the value at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: i32) -> Result<i32, ValidationError> {
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(ValidationError::IndexOutOfBounds { index, len })?;
        Ok(mem::replace(slot, value))
    }

    pub fn set_wide(&mut self, index: usize, value: i64) -> Result<i32, ValidationError> {
        self.set(index, check_i32(TagKind::IntArray, value)?)
    }

    pub fn remove(&mut self, index: usize) -> Result<i32, ValidationError> {
        if index >= self.0.len() {
            return Err(ValidationError::IndexOutOfBounds {
                index,
                len: self.0.len(),
            });
        }
        Ok(self.0.remove(index))
    }

    pub fn into_vec(self) -> Vec<i32> {
        self.0
    }
}
