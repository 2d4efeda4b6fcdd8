// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A resolver shared between threads.
//!
//! Registration takes the writer lock and acts as a full barrier; resolutions
//! only take the reader lock and therefore run concurrently with each other.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::path::ComponentPath;
use crate::resolve::ClassResolver;
use crate::tree::OverrideTree;

/// A cloneable handle to one [`ClassResolver`] behind a readers-writer lock.
///
/// Clones share the same resolver, tables and cache.
///
/// ```rust
/// use std::thread;
///
/// use understory_class_cascade::{OverrideNode, OverrideTree, SharedClassResolver};
///
/// let shared = SharedClassResolver::default();
/// shared.register_bindings(&OverrideTree::new().part("button", OverrideNode::new().classes(["btn"])));
///
/// let worker = shared.clone();
/// let classes = thread::spawn(move || worker.class_names("button", &["menu"]))
///     .join()
///     .unwrap();
/// assert_eq!(classes, ["btn"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedClassResolver {
    inner: Arc<RwLock<ClassResolver>>,
}

impl SharedClassResolver {
    /// Wraps `resolver` for sharing.
    #[must_use]
    pub fn new(resolver: ClassResolver) -> Self {
        Self {
            inner: Arc::new(RwLock::new(resolver)),
        }
    }

    /// Replaces all bindings with the ones described by `tree`.
    pub fn register_bindings(&self, tree: &OverrideTree) {
        self.inner.write().register_bindings(tree);
    }

    /// Replaces all bindings with the ones described by `trees`.
    pub fn register_all<'a, I>(&self, trees: I)
    where
        I: IntoIterator<Item = &'a OverrideTree>,
    {
        self.inner.write().register_all(trees);
    }

    /// Returns the classes for `part` at `path`.
    #[must_use]
    pub fn class_names<S: AsRef<str>>(&self, part: &str, path: &[S]) -> Vec<String> {
        self.inner.read().class_names(part, path)
    }

    /// Returns the classes for `part` at `path`.
    #[must_use]
    pub fn class_names_at(&self, part: &str, path: &ComponentPath) -> Vec<String> {
        self.inner.read().class_names_at(part, path)
    }

    /// Locks the resolver for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, ClassResolver> {
        self.inner.read()
    }
}

impl From<ClassResolver> for SharedClassResolver {
    fn from(resolver: ClassResolver) -> Self {
        Self::new(resolver)
    }
}
