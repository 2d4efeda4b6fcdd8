// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Merging resolved classes with an element's own classes.

use core::fmt;

use crate::path::ComponentPath;

/// An ordered list of unique class tokens.
///
/// Tokens are trimmed on entry and empty tokens are ignored. [`fmt::Display`]
/// renders the list as a `class` attribute value.
///
/// ```rust
/// use understory_class_cascade::ClassList;
///
/// let mut list: ClassList = ["btn", " btn--primary ", "btn"].into_iter().collect();
/// list.toggle("is-active", true);
/// list.toggle("btn--primary", false);
///
/// assert_eq!(list.to_string(), "btn is-active");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `token` unless it is empty or already present.
    ///
    /// Returns `true` if the list changed.
    pub fn push(&mut self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_owned());
        true
    }

    /// Adds `token` when `on` is `true`, removes it otherwise.
    pub fn toggle(&mut self, token: &str, on: bool) {
        if on {
            self.push(token);
        } else {
            let token = token.trim();
            self.tokens.retain(|existing| existing != token);
        }
    }

    /// Returns `true` if `token` is in the list.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|existing| existing == token)
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the tokens in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Consumes the list, returning its tokens.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

impl<S: AsRef<str>> Extend<S> for ClassList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for token in iter {
            self.push(token.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

/// The classes and paths of one rendered element.
///
/// Built by [`ClassResolver::element_classes`](crate::ClassResolver::element_classes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementClasses {
    pub(crate) classes: ClassList,
    pub(crate) component_path: ComponentPath,
    pub(crate) parent_path: ComponentPath,
}

impl ElementClasses {
    /// Returns the merged classes: intrinsic ones first, then resolved ones.
    #[must_use]
    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Returns the merged classes as a `class` attribute value.
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.classes.to_string()
    }

    /// Returns the path to hand down to this element's children.
    #[must_use]
    pub fn component_path(&self) -> &ComponentPath {
        &self.component_path
    }

    /// Returns the path the element was resolved at.
    #[must_use]
    pub fn parent_path(&self) -> &ComponentPath {
        &self.parent_path
    }
}
