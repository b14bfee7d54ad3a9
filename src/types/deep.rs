//! Whole-subtree walks that use a heap worklist instead of the call stack:
//! equality, cloning, and teardown.
//!
//! Derived impls recurse once per nesting level and overflow on trees the
//! codec decodes without trouble, so `Tag`, `ListTag` and `CompoundTag`
//! route `PartialEq`, `Clone` and `Drop` through here.

use std::{mem, slice};

use indexmap::map::Iter as EntryIter;

use super::{CompoundTag, ListTag, Tag};

/// Compares every pair in `pending`, descending into containers.
pub(super) fn tags_eq<'a>(mut pending: Vec<(&'a Tag, &'a Tag)>) -> bool {
    while let Some(pair) = pending.pop() {
        let same = match pair {
            (Tag::Byte(a), Tag::Byte(b)) => a == b,
            (Tag::Short(a), Tag::Short(b)) => a == b,
            (Tag::Int(a), Tag::Int(b)) => a == b,
            (Tag::Long(a), Tag::Long(b)) => a == b,
            (Tag::Float(a), Tag::Float(b)) => a == b,
            (Tag::Double(a), Tag::Double(b)) => a == b,
            (Tag::ByteArray(a), Tag::ByteArray(b)) => a == b,
            (Tag::String(a), Tag::String(b)) => a == b,
            (Tag::IntArray(a), Tag::IntArray(b)) => a == b,
            (Tag::List(a), Tag::List(b)) => push_item_pairs(a, b, &mut pending),
            (Tag::Compound(a), Tag::Compound(b)) => push_entry_pairs(a, b, &mut pending),
            _ => false,
        };
        if !same {
            return false;
        }
    }
    true
}

/// Queues element pairs, or returns false if the lists differ in shape.
pub(super) fn push_item_pairs<'a>(
    a: &'a ListTag,
    b: &'a ListTag,
    pending: &mut Vec<(&'a Tag, &'a Tag)>,
) -> bool {
    if a.element_kind() != b.element_kind() || a.len() != b.len() {
        return false;
    }
    pending.extend(a.as_slice().iter().zip(b.as_slice()));
    true
}

/// Queues value pairs by key, or returns false if the key sets differ.
/// Entry order is not compared.
pub(super) fn push_entry_pairs<'a>(
    a: &'a CompoundTag,
    b: &'a CompoundTag,
    pending: &mut Vec<(&'a Tag, &'a Tag)>,
) -> bool {
    if a.len() != b.len() {
        return false;
    }
    for (key, left) in a {
        match b.get(key) {
            Some(right) => pending.push((left, right)),
            None => return false,
        }
    }
    true
}

/// A container copy in progress: the source still to visit and the
/// destination built so far.
enum CloneFrame<'a> {
    List {
        src: slice::Iter<'a, Tag>,
        dst: ListTag,
    },
    Compound {
        src: EntryIter<'a, String, Tag>,
        dst: CompoundTag,
        key: Option<&'a String>,
    },
}

impl<'a> CloneFrame<'a> {
    /// Starts copying a container, or hands back a leaf copied outright.
    fn open(tag: &'a Tag) -> Result<Self, Tag> {
        let leaf = match tag {
            Tag::List(list) => {
                return Ok(Self::List {
                    src: list.as_slice().iter(),
                    dst: ListTag::with_capacity(list.element_kind(), list.len()),
                });
            }
            Tag::Compound(compound) => {
                return Ok(Self::Compound {
                    src: compound.iter(),
                    dst: CompoundTag::with_capacity(compound.len()),
                    key: None,
                });
            }
            Tag::Byte(v) => Tag::Byte(*v),
            Tag::Short(v) => Tag::Short(*v),
            Tag::Int(v) => Tag::Int(*v),
            Tag::Long(v) => Tag::Long(*v),
            Tag::Float(v) => Tag::Float(*v),
            Tag::Double(v) => Tag::Double(*v),
            Tag::ByteArray(v) => Tag::ByteArray(v.clone()),
            Tag::String(v) => Tag::String(v.clone()),
            Tag::IntArray(v) => Tag::IntArray(v.clone()),
        };
        Err(leaf)
    }

    fn next_child(&mut self) -> Option<&'a Tag> {
        match self {
            Self::List { src, .. } => src.next(),
            Self::Compound { src, key, .. } => src.next().map(|(k, v)| {
                *key = Some(k);
                v
            }),
        }
    }

    fn attach(&mut self, tag: Tag) {
        match self {
            Self::List { dst, .. } => dst.push_unchecked(tag),
            Self::Compound { dst, key, .. } => {
                if let Some(key) = key.take() {
                    dst.insert_unchecked(key.clone(), tag);
                }
            }
        }
    }

    fn finish(self) -> Tag {
        match self {
            Self::List { dst, .. } => Tag::List(dst),
            Self::Compound { dst, .. } => Tag::Compound(dst),
        }
    }
}

/// Deep-copies `root`. Elements were validated when the source was built,
/// so they are attached without re-checking.
pub(super) fn clone_tag(root: &Tag) -> Tag {
    let mut current = match CloneFrame::open(root) {
        Ok(frame) => frame,
        Err(leaf) => return leaf,
    };
    let mut parents = Vec::new();

    loop {
        match current.next_child() {
            Some(child) => match CloneFrame::open(child) {
                Ok(frame) => parents.push(mem::replace(&mut current, frame)),
                Err(leaf) => current.attach(leaf),
            },
            None => {
                let done = current.finish();
                match parents.pop() {
                    Some(mut parent) => {
                        parent.attach(done);
                        current = parent;
                    }
                    None => return done,
                }
            }
        }
    }
}

/// Tears down a subtree without recursive drops.
pub(super) fn drop_nested(mut pending: Vec<Tag>) {
    while let Some(mut tag) = pending.pop() {
        match &mut tag {
            Tag::List(list) => list.drain_into(&mut pending),
            Tag::Compound(compound) => compound.drain_into(&mut pending),
            _ => {}
        }
    }
}
