// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Class Cascade: resolve class names from a part's position in a
//! component tree.
//!
//! Every rendered element has a *part name* (`"button"`, `"menu-item"`) and a
//! *component path*: the part names of its ancestors, outermost first. A
//! site-supplied [`OverrideTree`] sets a base class list per part and patches
//! or replaces it whenever the part appears under particular ancestors. This
//! crate compiles such trees into flat tables once and answers per-element
//! queries quickly.
//!
//! ## Core Concepts
//!
//! ### Override trees
//!
//! An [`OverrideTree`] maps part names to [`OverrideNode`]s. The special key
//! `classes` holds a [`ClassSpec`]; every other key is a nested part bound
//! under the chain of keys above it.
//!
//! ### Compilation
//!
//! [`BindingCompiler`] flattens trees into [`CompiledBindings`]: a
//! [`RuleTable`] arena of [`Rule`]s and, per part, an optional base rule plus
//! [`ChainRule`]s ordered from least to most specific.
//!
//! ### Resolution
//!
//! [`ClassResolver`] applies the base rule and then every chain whose
//! [`ChainPattern`] is an ordered subsequence of the element's path, shortest
//! pattern first. Results are memoized per `(part, path)` until the next
//! registration.
//!
//! **Base rule → matching chains (shortest first)**
//!
//! ```rust
//! use understory_class_cascade::{ClassResolver, ComponentPath, OverrideNode, OverrideTree};
//!
//! let tree = OverrideTree::new()
//!     .part("button", OverrideNode::new().classes(["btn"]))
//!     .part(
//!         "menu",
//!         OverrideNode::new()
//!             .part("button", OverrideNode::new().add(["btn--in-menu"]))
//!             .part(
//!                 "menu-item",
//!                 OverrideNode::new().part("button", OverrideNode::new().classes(["item-btn"])),
//!             ),
//!     );
//!
//! let resolver = ClassResolver::from_trees([&tree]);
//!
//! let menu = ComponentPath::root().child("menu");
//! assert_eq!(resolver.class_names_at("button", &menu), ["btn", "btn--in-menu"]);
//!
//! // `menu-item` need not be a direct child of `menu`.
//! let item = menu.child("list").child("menu-item");
//! assert_eq!(resolver.class_names_at("button", &item), ["item-btn"]);
//!
//! assert_eq!(resolver.class_names_at("button", &ComponentPath::root()), ["btn"]);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Deserialize` for [`OverrideTree`], [`OverrideNode`] and
//!   [`ClassSpec`] in the JSON shape used by bindings files.

mod cache;
mod chain;
mod class_list;
mod compile;
mod intern;
mod path;
mod resolve;
mod rule;
mod shared;
mod tree;

pub use chain::{ChainPattern, ChainRule, is_ordered_subsequence};
pub use class_list::{ClassList, ElementClasses};
pub use compile::{BindingCompiler, BindingStats, CompiledBindings, PartBindings};
pub use intern::{PartId, PartInterner};
pub use path::ComponentPath;
pub use resolve::ClassResolver;
pub use rule::{ClassTokens, Rule, RuleId, RuleTable};
pub use shared::SharedClassResolver;
pub use tree::{CLASSES_KEY, ClassSpec, OverrideNode, OverrideTree};
