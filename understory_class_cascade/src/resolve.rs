// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-name resolution.
//!
//! [`ClassResolver`] answers "which classes apply to part `P` under ancestors
//! `A`" from a set of [`CompiledBindings`]. The cascade for one element is:
//!
//! **Base rule → matching chain rules, shortest pattern first**
//!
//! so a longer (more specific) chain is applied last and wins both full
//! replacements and conflicting toggles.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cache::ResolveCache;
use crate::class_list::{ClassList, ElementClasses};
use crate::compile::{BindingStats, CompiledBindings, PartBindings};
use crate::intern::PartId;
use crate::path::ComponentPath;
use crate::tree::OverrideTree;

/// Resolves class names for parts at component paths, memoizing results.
///
/// Each configuration load owns its own resolver; nothing is shared between
/// instances. Resolution takes `&self` and the resolver is `Send + Sync`.
/// Registration takes `&mut self`, so no resolution can observe a half-built
/// table.
///
/// ```rust
/// use understory_class_cascade::{ClassResolver, OverrideNode, OverrideTree};
///
/// let tree = OverrideTree::new()
///     .part("button", OverrideNode::new().classes(["btn"]))
///     .part(
///         "menu",
///         OverrideNode::new().part("button", OverrideNode::new().add(["btn--in-menu"])),
///     );
///
/// let mut resolver = ClassResolver::new();
/// resolver.register_bindings(&tree);
///
/// assert_eq!(resolver.class_names("button", &[] as &[&str]), ["btn"]);
/// assert_eq!(resolver.class_names("button", &["menu"]), ["btn", "btn--in-menu"]);
/// assert_eq!(resolver.class_names("button", &["toolbar"]), ["btn"]);
/// assert!(resolver.class_names("nonexistent-part", &[] as &[&str]).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ClassResolver {
    bindings: CompiledBindings,
    cache: ResolveCache,
}

impl ClassResolver {
    /// Creates a resolver with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver from `trees`, compiled in order.
    #[must_use]
    pub fn from_trees<'a, I>(trees: I) -> Self
    where
        I: IntoIterator<Item = &'a OverrideTree>,
    {
        Self {
            bindings: CompiledBindings::compile(trees),
            cache: ResolveCache::default(),
        }
    }

    /// Replaces all bindings with the ones described by `tree`.
    ///
    /// Calling this again with the same tree yields the same resolutions.
    pub fn register_bindings(&mut self, tree: &OverrideTree) {
        self.register_all([tree]);
    }

    /// Replaces all bindings with the ones described by `trees`.
    ///
    /// The trees form one derivation: later trees override earlier ones slot
    /// by slot. The cache is cleared.
    pub fn register_all<'a, I>(&mut self, trees: I)
    where
        I: IntoIterator<Item = &'a OverrideTree>,
    {
        self.bindings = CompiledBindings::compile(trees);
        self.cache.clear();
        debug!("registered class bindings");
    }

    /// Returns the classes for `part` at `path`.
    ///
    /// `path` lists the ancestor part names, outermost first, without `part`
    /// itself. Unknown parts resolve to an empty list. The returned vector is
    /// owned by the caller.
    #[must_use]
    pub fn class_names<S: AsRef<str>>(&self, part: &str, path: &[S]) -> Vec<String> {
        let Some((part_id, rules)) = self.bindings.part(part) else {
            return Vec::new();
        };
        if let Some(classes) = self.cache.get(part_id, path) {
            return classes;
        }
        let classes = self.compute(rules, path);
        trace!(part, depth = path.len(), ?classes, "resolved class names");
        self.cache.insert(part_id, path, &classes);
        classes
    }

    /// Returns the classes for `part` at `path`.
    #[must_use]
    pub fn class_names_at(&self, part: &str, path: &ComponentPath) -> Vec<String> {
        self.class_names(part, path.as_slice())
    }

    /// Resolves an element and merges the result with its intrinsic classes.
    ///
    /// ```rust
    /// use understory_class_cascade::{ClassResolver, ComponentPath, OverrideNode, OverrideTree};
    ///
    /// let tree = OverrideTree::new().part(
    ///     "nav",
    ///     OverrideNode::new().part("link", OverrideNode::new().classes(["nav-link", "link"])),
    /// );
    /// let resolver = ClassResolver::from_trees([&tree]);
    ///
    /// let parent = ComponentPath::root().child("nav");
    /// let element = resolver.element_classes("link", ["link", "external"], &parent);
    ///
    /// assert_eq!(element.class_attr(), "link external nav-link");
    /// assert_eq!(element.component_path().to_string(), "nav/link");
    /// ```
    #[must_use]
    pub fn element_classes<I, S>(
        &self,
        part: &str,
        intrinsic: I,
        parent: &ComponentPath,
    ) -> ElementClasses
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: ClassList = intrinsic.into_iter().collect();
        classes.extend(self.class_names_at(part, parent));
        ElementClasses {
            classes,
            component_path: parent.child(part),
            parent_path: parent.clone(),
        }
    }

    /// Returns the compiled tables.
    #[must_use]
    pub fn bindings(&self) -> &CompiledBindings {
        &self.bindings
    }

    /// Returns counts describing the registered bindings.
    #[must_use]
    pub fn stats(&self) -> BindingStats {
        self.bindings.stats()
    }

    /// Returns the number of memoized resolutions.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every memoized resolution.
    pub fn clear_cache(&self) {
        self.cache.clear_shared();
    }

    fn compute<S: AsRef<str>>(&self, rules: &PartBindings, path: &[S]) -> Vec<String> {
        let table = self.bindings.rules();
        let mut classes = Vec::new();
        if let Some(base) = rules.base() {
            table.apply(base, &mut classes);
        }
        if !path.is_empty() && !rules.chains().is_empty() {
            let parts = self.bindings.parts();
            let ids: SmallVec<[Option<PartId>; 8]> =
                path.iter().map(|name| parts.lookup(name.as_ref())).collect();
            for chain in rules.chains() {
                if chain.pattern().matches(&ids) {
                    table.apply(chain.rule(), &mut classes);
                }
            }
        }
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::OverrideNode;

    const ROOT: &[&str] = &[];

    fn precedence_tree() -> OverrideTree {
        OverrideTree::new()
            .part("button", OverrideNode::new().classes(["x"]))
            .part(
                "m",
                OverrideNode::new()
                    .part("button", OverrideNode::new().add(["y"]))
                    .part(
                        "n",
                        OverrideNode::new().part("button", OverrideNode::new().classes(["z"])),
                    ),
            )
    }

    #[test]
    fn longer_chain_wins() {
        let resolver = ClassResolver::from_trees([&precedence_tree()]);
        assert_eq!(resolver.class_names("button", &["m", "n"]), ["z"]);
        assert_eq!(resolver.class_names("button", &["m"]), ["x", "y"]);
        assert_eq!(resolver.class_names("button", ROOT), ["x"]);
    }

    #[test]
    fn longer_toggle_beats_shorter_toggle() {
        let tree = OverrideTree::new()
            .part(
                "a",
                OverrideNode::new()
                    .part("item", OverrideNode::new().add(["hl"]))
                    .part(
                        "b",
                        OverrideNode::new().part("item", OverrideNode::new().remove(["hl"])),
                    ),
            );
        let resolver = ClassResolver::from_trees([&tree]);
        assert_eq!(resolver.class_names("item", &["a"]), ["hl"]);
        assert!(resolver.class_names("item", &["a", "b"]).is_empty());
    }

    #[test]
    fn base_only_ignores_path() {
        let tree = OverrideTree::new().part("button", OverrideNode::new().classes(["btn", "btn-lg"]));
        let resolver = ClassResolver::from_trees([&tree]);
        let paths: [&[&str]; 3] = [ROOT, &["menu"], &["a", "b", "c"]];
        for path in paths {
            assert_eq!(resolver.class_names("button", path), ["btn", "btn-lg"]);
        }
    }

    #[test]
    fn subsequence_not_substring() {
        let tree = OverrideTree::new().part(
            "a",
            OverrideNode::new().part(
                "b",
                OverrideNode::new().part("leaf", OverrideNode::new().classes(["hit"])),
            ),
        );
        let resolver = ClassResolver::from_trees([&tree]);
        assert_eq!(resolver.class_names("leaf", &["a", "x", "b"]), ["hit"]);
        assert!(resolver.class_names("leaf", &["b", "a"]).is_empty());
        assert!(resolver.class_names("leaf", &["a"]).is_empty());
    }

    #[test]
    fn equal_length_chains_apply_in_registration_order() {
        let tree = OverrideTree::new()
            .part(
                "left",
                OverrideNode::new().part("leaf", OverrideNode::new().classes(["left"])),
            )
            .part(
                "right",
                OverrideNode::new().part("leaf", OverrideNode::new().classes(["right"])),
            );
        let resolver = ClassResolver::from_trees([&tree]);
        assert_eq!(resolver.class_names("leaf", &["right", "left"]), ["right"]);
    }

    #[test]
    fn cached_results_are_independent_copies() {
        let resolver = ClassResolver::from_trees([&precedence_tree()]);
        let mut first = resolver.class_names("button", &["m"]);
        let second = resolver.class_names("button", &["m"]);
        assert_eq!(first, second);
        assert_eq!(resolver.cache_len(), 1);

        first.push("mutated".into());
        first.clear();
        assert_eq!(resolver.class_names("button", &["m"]), ["x", "y"]);
        assert_eq!(second, ["x", "y"]);
    }

    #[test]
    fn unknown_part_is_empty_and_not_cached() {
        let resolver = ClassResolver::from_trees([&precedence_tree()]);
        assert!(resolver.class_names("nonexistent-part", ROOT).is_empty());
        assert!(resolver.class_names("m", &["x"]).is_empty());
        assert_eq!(resolver.cache_len(), 0);
    }

    #[test]
    fn reregistration_is_idempotent_and_drops_stale_entries() {
        let mut resolver = ClassResolver::new();
        resolver.register_bindings(&precedence_tree());
        let before = resolver.class_names("button", &["m"]);
        resolver.register_bindings(&precedence_tree());
        assert_eq!(resolver.cache_len(), 0);
        assert_eq!(resolver.class_names("button", &["m"]), before);

        let replacement =
            OverrideTree::new().part("button", OverrideNode::new().classes(["other"]));
        resolver.register_bindings(&replacement);
        assert_eq!(resolver.class_names("button", &["m"]), ["other"]);
        assert_eq!(resolver.class_names("button", &["m", "n"]), ["other"]);
    }

    #[test]
    fn reregistration_starts_from_fresh_tables() {
        let mut resolver = ClassResolver::from_trees([&precedence_tree()]);
        assert_eq!(resolver.bindings().parts().len(), 3);
        assert_eq!(resolver.stats().rules, 3);

        let small = OverrideTree::new().part("link", OverrideNode::new().classes(["a"]));
        resolver.register_bindings(&small);
        assert_eq!(resolver.bindings().parts().len(), 1);
        assert_eq!(resolver.bindings().parts().lookup("m"), None);
        assert_eq!(resolver.stats(), BindingStats {
            parts: 1,
            rules: 1,
            chains: 0,
        });
    }

    #[test]
    fn registration_is_not_additive_across_calls() {
        let mut resolver = ClassResolver::new();
        resolver.register_bindings(&OverrideTree::new().part("a", OverrideNode::new().classes(["a"])));
        resolver.register_bindings(&OverrideTree::new().part("b", OverrideNode::new().classes(["b"])));
        assert!(resolver.class_names("a", ROOT).is_empty());
        assert_eq!(resolver.class_names("b", ROOT), ["b"]);
    }

    #[test]
    fn later_trees_override_earlier_ones() {
        let site = OverrideTree::new().part("button", OverrideNode::new().classes(["btn"]));
        let theme = OverrideTree::new().part(
            "button",
            OverrideNode::new().part("menu", OverrideNode::new().classes(["menu-in-button"])),
        );
        let patch = OverrideTree::new().part("button", OverrideNode::new().add(["themed"]));
        let resolver = ClassResolver::from_trees([&site, &theme, &patch]);

        // The patch replaced the base slot; it toggles onto an empty list.
        assert_eq!(resolver.class_names("button", ROOT), ["themed"]);
        assert_eq!(resolver.class_names("menu", &["button"]), ["menu-in-button"]);
        assert_eq!(resolver.stats().parts, 2);
    }

    #[test]
    fn clear_cache_keeps_bindings() {
        let resolver = ClassResolver::from_trees([&precedence_tree()]);
        let _ = resolver.class_names("button", &["m", "n"]);
        resolver.clear_cache();
        assert_eq!(resolver.cache_len(), 0);
        assert_eq!(resolver.class_names("button", &["m", "n"]), ["z"]);
    }

    #[test]
    fn element_classes_dedups_intrinsic() {
        let resolver = ClassResolver::from_trees([&precedence_tree()]);
        let parent = ComponentPath::root().child("m");
        let element = resolver.element_classes("button", ["y", "own"], &parent);
        assert_eq!(element.class_attr(), "y own x");
        assert_eq!(element.parent_path(), &parent);
        assert_eq!(element.component_path().to_string(), "m/button");
    }

    #[test]
    fn resolver_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassResolver>();
    }
}
