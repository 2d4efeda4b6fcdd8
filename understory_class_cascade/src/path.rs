// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component paths.
//!
//! A [`ComponentPath`] is the chain of ancestor part names of an element, from
//! the outermost ancestor to the immediate parent. A container hands its own
//! path plus its part name (see [`ComponentPath::child`]) down to its children.

use core::fmt;
use std::sync::Arc;

/// An immutable, cheaply clonable ancestor chain.
///
/// ```rust
/// use understory_class_cascade::ComponentPath;
///
/// let root = ComponentPath::root();
/// let menu = root.child("menu");
/// let item = menu.child("menu-item");
///
/// assert!(root.is_empty());
/// assert_eq!(item.as_slice().len(), 2);
/// assert_eq!(item.to_string(), "menu/menu-item");
/// assert_eq!(menu.len(), 1);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ComponentPath {
    parts: Arc<[Box<str>]>,
}

impl ComponentPath {
    /// The path of a root-level element.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path seen by the children of an element with part `part`
    /// at this path.
    #[must_use]
    pub fn child(&self, part: &str) -> Self {
        let parts: Vec<Box<str>> = self
            .parts
            .iter()
            .cloned()
            .chain(core::iter::once(part.into()))
            .collect();
        Self {
            parts: parts.into(),
        }
    }

    /// Returns the parent's path, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.parts.split_last()?;
        Some(Self {
            parts: rest.into(),
        })
    }

    /// Returns the part names, outermost first.
    #[must_use]
    pub fn as_slice(&self) -> &[Box<str>] {
        &self.parts
    }

    /// Returns the number of ancestors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` for a root-level path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns an iterator over the part names, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.parts.iter().map(|part| &**part)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ComponentPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let parts: Vec<Box<str>> = iter.into_iter().map(|part| part.as_ref().into()).collect();
        Self {
            parts: parts.into(),
        }
    }
}

impl fmt::Debug for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, part) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}
