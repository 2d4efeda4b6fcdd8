// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized resolutions keyed by `(part, path)`.
//!
//! Keys store the path as a sequence of names rather than a joined string, so
//! `["a-b"]` and `["a", "b"]` stay distinct. Lookups hash the borrowed path
//! directly and do not allocate.

use core::hash::{Hash, Hasher};

use hashbrown::{Equivalent, HashMap};
use parking_lot::RwLock;

use crate::intern::PartId;

#[derive(Debug, PartialEq, Eq)]
struct CacheKey {
    part: PartId,
    path: Box<[Box<str>]>,
}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_entry(self.part, self.path.iter().map(|name| &**name), state);
    }
}

/// Borrowed form of [`CacheKey`].
struct CacheQuery<'a, S> {
    part: PartId,
    path: &'a [S],
}

impl<S: AsRef<str>> Hash for CacheQuery<'_, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_entry(self.part, self.path.iter().map(AsRef::as_ref), state);
    }
}

impl<S: AsRef<str>> Equivalent<CacheKey> for CacheQuery<'_, S> {
    fn equivalent(&self, key: &CacheKey) -> bool {
        self.part == key.part
            && self.path.len() == key.path.len()
            && self
                .path
                .iter()
                .zip(key.path.iter())
                .all(|(a, b)| a.as_ref() == &**b)
    }
}

fn hash_entry<'a, H: Hasher>(
    part: PartId,
    path: impl ExactSizeIterator<Item = &'a str>,
    state: &mut H,
) {
    part.hash(state);
    state.write_usize(path.len());
    for name in path {
        name.hash(state);
    }
}

/// Thread-safe resolution cache.
///
/// Concurrent resolutions of the same key may both insert; the content for a
/// key is always identical, so the last write winning is harmless.
#[derive(Debug, Default)]
pub(crate) struct ResolveCache {
    entries: RwLock<HashMap<CacheKey, Box<[String]>>>,
}

impl ResolveCache {
    pub(crate) fn get<S: AsRef<str>>(&self, part: PartId, path: &[S]) -> Option<Vec<String>> {
        self.entries
            .read()
            .get(&CacheQuery { part, path })
            .map(|classes| classes.to_vec())
    }

    pub(crate) fn insert<S: AsRef<str>>(&self, part: PartId, path: &[S], classes: &[String]) {
        let key = CacheKey {
            part,
            path: path.iter().map(|name| name.as_ref().into()).collect(),
        };
        self.entries.write().insert(key, classes.into());
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.get_mut().clear();
    }

    pub(crate) fn clear_shared(&self) {
        self.entries.write().clear();
    }
}
