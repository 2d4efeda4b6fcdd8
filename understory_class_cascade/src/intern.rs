// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Part-name interning.
//!
//! Chain patterns are compared element by element on every resolution, so the
//! compiler stores them as compact [`PartId`] handles instead of strings.
//! [`PartInterner`] owns the names; each name is stored exactly once and
//! lookups by `&str` never allocate.
//!
//! ## Example
//!
//! ```rust
//! use understory_class_cascade::PartInterner;
//!
//! let mut parts = PartInterner::new();
//! let button = parts.intern("button");
//! let menu = parts.intern("menu");
//!
//! assert_eq!(parts.intern("button"), button);
//! assert_ne!(button, menu);
//! assert_eq!(parts.lookup("menu"), Some(menu));
//! assert_eq!(parts.lookup("footer"), None);
//! assert_eq!(parts.name(button), Some("button"));
//! ```

use core::hash::BuildHasher;

use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;
use smallvec::SmallVec;

/// A compact, interned part name.
///
/// Ids are only meaningful for the [`PartInterner`] that produced them. Each
/// registration compiles into a new interner, so ids never outlive it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct PartId(u32);

impl PartId {
    /// Returns this id as a `usize` index.
    #[inline]
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Interns part names into [`PartId`] handles.
///
/// Names are stored once in an internal table. Lookups go through a hash-bucket
/// index (hash -> small list of candidate ids) so the table never holds a
/// second copy of a name.
#[derive(Debug, Clone, Default)]
pub struct PartInterner {
    names: Vec<Box<str>>,
    buckets: HashMap<u64, SmallVec<[PartId; 1]>>,
    build_hasher: DefaultHashBuilder,
}

impl PartInterner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of interned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no names have been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the name for an interned id, if the id is in range.
    #[must_use]
    pub fn name(&self, id: PartId) -> Option<&str> {
        self.names.get(id.as_usize()).map(|name| &**name)
    }

    /// Returns the id of `name` if it has been interned.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<PartId> {
        let hash = self.build_hasher.hash_one(name);
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|id| &*self.names[id.as_usize()] == name)
    }

    /// Interns `name` and returns its [`PartId`].
    ///
    /// If an equal name was already interned, the existing id is returned.
    pub fn intern(&mut self, name: &str) -> PartId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let hash = self.build_hasher.hash_one(name);
        let id = PartId(
            u32::try_from(self.names.len()).expect("too many interned part names for PartId (u32)"),
        );
        self.names.push(name.into());
        self.buckets.entry(hash).or_default().push(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interns_duplicates_to_same_id() {
        let mut parts = PartInterner::new();
        let a0 = parts.intern("list-item");
        let a1 = parts.intern("list-item");
        let b = parts.intern("menu");

        assert_eq!(a0, a1);
        assert_ne!(a0, b);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts.name(a0), Some("list-item"));
        assert_eq!(parts.name(b), Some("menu"));
    }

    #[test]
    fn lookup_does_not_intern() {
        let mut parts = PartInterner::new();
        parts.intern("menu");
        assert_eq!(parts.lookup("footer"), None);
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn ids_follow_interning_order() {
        let mut parts = PartInterner::new();
        let b = parts.intern("b");
        let a = parts.intern("a");
        assert_eq!((b.as_usize(), a.as_usize()), (0, 1));
        assert_eq!(parts.name(a), Some("a"));
    }
}
