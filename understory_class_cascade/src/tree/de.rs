// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `serde` support for override trees.
//!
//! Nodes are plain maps: the key `classes` holds the [`ClassSpec`] and every
//! other key is a nested part. Keys are visited in document order, which
//! becomes registration order.

use core::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use super::{CLASSES_KEY, ClassSpec, OverrideNode, OverrideTree};

impl<'de> Deserialize<'de> for OverrideTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TreeVisitor;

        impl<'de> Visitor<'de> for TreeVisitor {
            type Value = OverrideTree;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map from part names to binding nodes")
            }

            fn visit_map<A>(self, mut map: A) -> Result<OverrideTree, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut tree = OverrideTree::new();
                while let Some(name) = map.next_key::<String>()? {
                    let node = map.next_value::<OverrideNode>()?;
                    tree.insert(name, node);
                }
                Ok(tree)
            }
        }

        deserializer.deserialize_map(TreeVisitor)
    }
}

impl<'de> Deserialize<'de> for OverrideNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = OverrideNode;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a binding node (`classes` and nested parts)")
            }

            fn visit_map<A>(self, mut map: A) -> Result<OverrideNode, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut classes = None;
                let mut children = OverrideTree::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == CLASSES_KEY {
                        classes = map.next_value::<Option<RawClassSpec>>()?.map(Into::into);
                    } else {
                        children.insert(key, map.next_value::<OverrideNode>()?);
                    }
                }
                Ok(OverrideNode { classes, children })
            }
        }

        deserializer.deserialize_map(NodeVisitor)
    }
}

impl<'de> Deserialize<'de> for ClassSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawClassSpec::deserialize(deserializer).map(Into::into)
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged, expecting = "a list of class names or an `{ add, remove }` object")]
enum RawClassSpec {
    Replace(Vec<String>),
    Toggle {
        #[serde(default)]
        add: Option<Vec<String>>,
        #[serde(default)]
        remove: Option<Vec<String>>,
    },
}

impl From<RawClassSpec> for ClassSpec {
    fn from(raw: RawClassSpec) -> Self {
        match raw {
            RawClassSpec::Replace(classes) => Self::Replace(classes),
            RawClassSpec::Toggle { add, remove } => Self::Toggle {
                add: add.unwrap_or_default(),
                remove: remove.unwrap_or_default(),
            },
        }
    }
}
