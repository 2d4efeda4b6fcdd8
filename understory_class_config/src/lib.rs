// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Class Config: load and validate class-binding files.
//!
//! A bindings file is a JSON document whose `bindings` member holds one
//! override tree or a list of them:
//!
//! ```json
//! {
//!   "bindings": [
//!     { "button": { "classes": ["btn"] } },
//!     { "menu": { "button": { "classes": { "add": ["btn--in-menu"] } } } }
//!   ]
//! }
//! ```
//!
//! Every tree is validated on its own and all failures are reported together.
//! A loaded [`BindingsFile`] builds a fresh
//! [`ClassResolver`](understory_class_cascade::ClassResolver): one
//! configuration load, one resolver.
//!
//! ```rust
//! use understory_class_config::BindingsFile;
//!
//! let file = BindingsFile::from_json_str(
//!     r#"{ "bindings": [
//!         { "button": { "classes": ["btn"] } },
//!         { "menu": { "button": { "classes": { "add": ["btn--in-menu"] } } } }
//!     ] }"#,
//! )?;
//!
//! let resolver = file.build_resolver();
//! assert_eq!(resolver.class_names("button", &["menu"]), ["btn", "btn--in-menu"]);
//! assert_eq!(resolver.class_names("button", &["toolbar"]), ["btn"]);
//! # Ok::<(), understory_class_config::ConfigError>(())
//! ```

mod error;

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use understory_class_cascade::{ClassResolver, OverrideTree};

pub use error::{ConfigError, TreeError};

/// The validated contents of one or more bindings files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingsFile {
    bindings: Vec<OverrideTree>,
}

#[derive(Deserialize)]
struct RawBindingsFile {
    bindings: OneOrMany,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Value>),
    One(Value),
}

impl BindingsFile {
    /// Parses and validates a bindings document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawBindingsFile = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Reads, parses and validates a bindings document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let raw: RawBindingsFile = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    /// Validates an already parsed bindings document.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let raw = RawBindingsFile::deserialize(value)?;
        Self::from_raw(raw)
    }

    /// Wraps trees that were built or validated elsewhere.
    #[must_use]
    pub fn from_trees(bindings: Vec<OverrideTree>) -> Self {
        Self { bindings }
    }

    /// Returns the trees in file order.
    #[must_use]
    pub fn trees(&self) -> &[OverrideTree] {
        &self.bindings
    }

    /// Returns the number of trees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if there are no trees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Appends the trees of `other` after this file's trees.
    pub fn extend(&mut self, other: Self) {
        self.bindings.extend(other.bindings);
    }

    /// Compiles every tree, in order, into a new resolver.
    #[must_use]
    pub fn build_resolver(&self) -> ClassResolver {
        ClassResolver::from_trees(&self.bindings)
    }

    fn from_raw(raw: RawBindingsFile) -> Result<Self, ConfigError> {
        let values = match raw.bindings {
            OneOrMany::Many(values) => values,
            OneOrMany::One(value) => vec![value],
        };
        let mut bindings = Vec::with_capacity(values.len());
        let mut errors = Vec::new();
        for (index, value) in values.into_iter().enumerate() {
            match OverrideTree::deserialize(value) {
                Ok(tree) => bindings.push(tree),
                Err(source) => {
                    warn!(index, %source, "invalid binding tree");
                    errors.push(TreeError { index, source });
                }
            }
        }
        if !errors.is_empty() {
            return Err(ConfigError::InvalidTrees(errors));
        }
        debug!(trees = bindings.len(), "loaded class bindings");
        Ok(Self { bindings })
    }
}

/// Parses a single override tree.
pub fn parse_tree(json: &str) -> Result<OverrideTree, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_tree_is_accepted() {
        let file = BindingsFile::from_json_str(r#"{ "bindings": { "a": { "classes": ["x"] } } }"#)
            .unwrap();
        assert_eq!(file.len(), 1);
        assert_eq!(file.build_resolver().class_names("a", &[] as &[&str]), ["x"]);
    }

    #[test]
    fn reports_every_invalid_tree() {
        let err = BindingsFile::from_value(json!({
            "bindings": [
                { "ok": { "classes": ["fine"] } },
                { "bad": { "classes": [1, 2] } },
                { "worse": "not a node" }
            ]
        }))
        .unwrap_err();

        let ConfigError::InvalidTrees(errors) = &err else {
            panic!("expected tree errors, got {err:?}");
        };
        let indices: Vec<_> = errors.iter().map(|e| e.index).collect();
        assert_eq!(indices, [1, 2]);
        assert!(err.to_string().contains("binding tree 2"), "{err}");
    }

    #[test]
    fn missing_bindings_key_is_a_document_error() {
        let err = BindingsFile::from_json_str(r#"{ "trees": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)), "{err:?}");
    }

    #[test]
    fn malformed_json_is_a_document_error() {
        let err = BindingsFile::from_reader(&b"{ \"bindings\": "[..]).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)), "{err:?}");
    }

    #[test]
    fn files_extend_in_order() {
        let mut site = BindingsFile::from_value(json!({
            "bindings": { "button": { "classes": ["btn"] } }
        }))
        .unwrap();
        let theme = BindingsFile::from_value(json!({
            "bindings": { "button": { "classes": ["btn", "btn--dark"] } }
        }))
        .unwrap();
        site.extend(theme);

        assert_eq!(site.len(), 2);
        let resolver = site.build_resolver();
        assert_eq!(
            resolver.class_names("button", &[] as &[&str]),
            ["btn", "btn--dark"]
        );
        // Both trees declared the same base slot, so its list rule was reused.
        assert_eq!(resolver.stats().rules, 1);
    }

    #[test]
    fn toggle_members_are_optional() {
        let tree = parse_tree(
            r#"{ "button": { "classes": ["a", "b"], "menu": {} },
                 "menu": { "button": { "classes": { "remove": ["b"] } } } }"#,
        )
        .unwrap();
        let resolver = ClassResolver::from_trees([&tree]);
        assert_eq!(resolver.class_names("button", &["menu"]), ["a"]);
    }

    #[test]
    fn document_order_breaks_ties() {
        let file = BindingsFile::from_json_str(
            r#"{ "bindings": {
                "zeta": { "leaf": { "classes": ["zeta"] } },
                "alpha": { "leaf": { "classes": ["alpha"] } }
            } }"#,
        )
        .unwrap();
        let resolver = file.build_resolver();
        assert_eq!(resolver.class_names("leaf", &["alpha", "zeta"]), ["alpha"]);
    }

    #[test]
    fn literal_nesting_binds_the_inner_key() {
        // Nested keys name the part being bound; outer keys are its ancestors.
        let tree = parse_tree(
            r#"{ "button": { "classes": ["btn"], "menu": { "classes": { "add": ["btn--in-menu"] } } } }"#,
        )
        .unwrap();
        let resolver = ClassResolver::from_trees([&tree]);
        assert_eq!(resolver.class_names("button", &["menu"]), ["btn"]);
        assert_eq!(resolver.class_names("menu", &["button"]), ["btn--in-menu"]);
    }
}
