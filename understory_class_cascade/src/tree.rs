// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative override tree.
//!
//! An [`OverrideTree`] maps part names to [`OverrideNode`]s. A node may carry a
//! [`ClassSpec`] for its part and any number of nested parts. A nested part is
//! bound under the ancestor chain formed by every key above it, so
//!
//! ```json
//! { "menu": { "button": { "classes": { "add": ["btn--in-menu"] } } } }
//! ```
//!
//! patches the classes of `button` whenever it appears somewhere under `menu`.
//!
//! Trees can be built in code with the builder methods, or deserialized from
//! JSON with the `serde` feature.
//!
//! ```rust
//! use understory_class_cascade::{ClassSpec, OverrideNode, OverrideTree};
//!
//! let tree = OverrideTree::new()
//!     .part("button", OverrideNode::new().classes(["btn"]))
//!     .part(
//!         "menu",
//!         OverrideNode::new().part("button", OverrideNode::new().add(["btn--in-menu"])),
//!     );
//!
//! assert_eq!(tree.len(), 2);
//! let nested = tree.get("menu").and_then(|menu| menu.children().get("button"));
//! assert_eq!(
//!     nested.and_then(OverrideNode::class_spec),
//!     Some(&ClassSpec::Toggle {
//!         add: vec!["btn--in-menu".into()],
//!         remove: vec![],
//!     })
//! );
//! ```

#[cfg(feature = "serde")]
mod de;

/// The reserved node key holding a node's [`ClassSpec`].
pub const CLASSES_KEY: &str = "classes";

/// How a node changes the class list accumulated so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassSpec {
    /// Replace the accumulated list wholesale.
    Replace(Vec<String>),
    /// Append missing `add` tokens, then drop `remove` tokens.
    Toggle {
        /// Tokens to append when not already present.
        add: Vec<String>,
        /// Tokens to remove when present.
        remove: Vec<String>,
    },
}

/// An ordered mapping from part names to [`OverrideNode`]s.
///
/// Entry order is document order. It decides which of two equally specific
/// chains is applied last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideTree {
    parts: Vec<(String, OverrideNode)>,
}

impl OverrideTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the node for `name`.
    #[must_use]
    pub fn part(mut self, name: impl Into<String>, node: OverrideNode) -> Self {
        self.insert(name, node);
        self
    }

    /// Inserts the node for `name`.
    ///
    /// Like keys of a JSON object, a repeated name keeps its original position
    /// and takes the new node.
    pub fn insert(&mut self, name: impl Into<String>, node: OverrideNode) {
        let name = name.into();
        match self.parts.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => self.parts.push((name, node)),
        }
    }

    /// Returns the node for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OverrideNode> {
        self.parts
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    /// Returns the number of top-level parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if the tree has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns an iterator over `(name, node)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OverrideNode)> + '_ {
        self.parts.iter().map(|(name, node)| (name.as_str(), node))
    }
}

impl<S: Into<String>> FromIterator<(S, OverrideNode)> for OverrideTree {
    fn from_iter<I: IntoIterator<Item = (S, OverrideNode)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (name, node) in iter {
            tree.insert(name, node);
        }
        tree
    }
}

/// One node of an [`OverrideTree`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideNode {
    classes: Option<ClassSpec>,
    children: OverrideTree,
}

impl OverrideNode {
    /// Creates a node with no classes and no nested parts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a full replacement class list.
    #[must_use]
    pub fn classes<I, S>(self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec(ClassSpec::Replace(
            classes.into_iter().map(Into::into).collect(),
        ))
    }

    /// Adds tokens to this node's toggle patch.
    ///
    /// A previously set replacement list is discarded.
    #[must_use]
    pub fn add<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (mut add, remove) = self.take_toggle();
        add.extend(classes.into_iter().map(Into::into));
        self.spec(ClassSpec::Toggle { add, remove })
    }

    /// Adds tokens to the `remove` side of this node's toggle patch.
    ///
    /// A previously set replacement list is discarded.
    #[must_use]
    pub fn remove<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (add, mut remove) = self.take_toggle();
        remove.extend(classes.into_iter().map(Into::into));
        self.spec(ClassSpec::Toggle { add, remove })
    }

    /// Sets the class spec directly.
    #[must_use]
    pub fn spec(mut self, spec: ClassSpec) -> Self {
        self.classes = Some(spec);
        self
    }

    /// Adds (or replaces) a nested part.
    #[must_use]
    pub fn part(mut self, name: impl Into<String>, node: Self) -> Self {
        self.children.insert(name, node);
        self
    }

    /// Returns this node's class spec.
    #[must_use]
    pub fn class_spec(&self) -> Option<&ClassSpec> {
        self.classes.as_ref()
    }

    /// Returns the nested parts.
    #[must_use]
    pub fn children(&self) -> &OverrideTree {
        &self.children
    }

    /// Takes the current toggle lists; a replacement list or no spec yields
    /// empty ones.
    fn take_toggle(&mut self) -> (Vec<String>, Vec<String>) {
        match self.classes.take() {
            Some(ClassSpec::Toggle { add, remove }) => (add, remove),
            _ => (Vec::new(), Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_key_keeps_position() {
        let tree = OverrideTree::new()
            .part("a", OverrideNode::new().classes(["one"]))
            .part("b", OverrideNode::new())
            .part("a", OverrideNode::new().classes(["two"]));

        let names: Vec<_> = tree.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(
            tree.get("a").and_then(OverrideNode::class_spec),
            Some(&ClassSpec::Replace(vec!["two".into()]))
        );
    }

    #[test]
    fn add_and_remove_build_one_toggle() {
        let node = OverrideNode::new()
            .classes(["gone"])
            .add(["a", "b"])
            .remove(["b"]);
        assert_eq!(
            node.class_spec(),
            Some(&ClassSpec::Toggle {
                add: vec!["a".into(), "b".into()],
                remove: vec!["b".into()],
            })
        );
    }

    #[test]
    fn toggle_builders_accumulate_in_any_order() {
        let node = OverrideNode::new()
            .remove(["x"])
            .add(["a"])
            .remove(["y"])
            .add(["b"]);
        assert_eq!(
            node.class_spec(),
            Some(&ClassSpec::Toggle {
                add: vec!["a".into(), "b".into()],
                remove: vec!["x".into(), "y".into()],
            })
        );

        let replaced = node.classes(["z"]).add(["c"]);
        assert_eq!(
            replaced.class_spec(),
            Some(&ClassSpec::Toggle {
                add: vec!["c".into()],
                remove: vec![],
            })
        );
    }

    #[test]
    fn collects_from_pairs() {
        let tree: OverrideTree = [("x", OverrideNode::new()), ("y", OverrideNode::new())]
            .into_iter()
            .collect();
        assert_eq!(tree.len(), 2);
        assert!(tree.get("y").is_some());
        assert!(tree.get("z").is_none());
    }
}
