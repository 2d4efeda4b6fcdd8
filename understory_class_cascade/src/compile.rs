// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening override trees into binding tables.
//!
//! [`BindingCompiler`] walks one or more [`OverrideTree`]s and produces
//! [`CompiledBindings`]: a [`RuleTable`] plus, per part, an optional base rule
//! and a list of [`ChainRule`]s sorted by pattern length. Resolution then
//! touches only the chains of the part being resolved instead of re-walking
//! the tree.

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::chain::{ChainPattern, ChainRule};
use crate::intern::{PartId, PartInterner};
use crate::rule::{Rule, RuleId, RuleTable, normalize_tokens};
use crate::tree::{ClassSpec, OverrideNode, OverrideTree};

/// The rules attached to a single part.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartBindings {
    base: Option<RuleId>,
    chains: Vec<ChainRule>,
}

impl PartBindings {
    /// Returns the rule applied at every position, if any.
    #[must_use]
    pub fn base(&self) -> Option<RuleId> {
        self.base
    }

    /// Returns the chain rules, least specific first.
    #[must_use]
    pub fn chains(&self) -> &[ChainRule] {
        &self.chains
    }

    fn rule_at(&self, pattern: &[PartId]) -> Option<RuleId> {
        if pattern.is_empty() {
            return self.base;
        }
        self.chains
            .iter()
            .find(|chain| chain.pattern.as_slice() == pattern)
            .map(ChainRule::rule)
    }

    fn set_rule_at(&mut self, pattern: &[PartId], rule: RuleId) {
        if pattern.is_empty() {
            self.base = Some(rule);
            return;
        }
        match self
            .chains
            .iter_mut()
            .find(|chain| chain.pattern.as_slice() == pattern)
        {
            Some(chain) => chain.rule = rule,
            None => self.chains.push(ChainRule {
                pattern: ChainPattern::from_parts(pattern.iter().copied()),
                rule,
            }),
        }
    }
}

/// Counts describing a compiled binding set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingStats {
    /// Parts with at least one rule.
    pub parts: usize,
    /// Rules in the arena.
    pub rules: usize,
    /// Chain rules across all parts.
    pub chains: usize,
}

/// Immutable binding tables produced by [`BindingCompiler`].
#[derive(Clone, Debug, Default)]
pub struct CompiledBindings {
    parts: PartInterner,
    rules: RuleTable,
    bindings: HashMap<PartId, PartBindings>,
}

impl CompiledBindings {
    /// Compiles `trees` in order into a fresh binding set.
    ///
    /// Later trees override earlier ones slot by slot.
    #[must_use]
    pub fn compile<'a, I>(trees: I) -> Self
    where
        I: IntoIterator<Item = &'a OverrideTree>,
    {
        let mut compiler = BindingCompiler::new();
        for tree in trees {
            compiler.add_tree(tree);
        }
        compiler.build()
    }

    /// Returns the id and rules of `part`, if it has any.
    #[must_use]
    pub fn part(&self, part: &str) -> Option<(PartId, &PartBindings)> {
        let id = self.parts.lookup(part)?;
        self.bindings.get(&id).map(|bindings| (id, bindings))
    }

    /// Returns the part-name interner.
    #[must_use]
    pub fn parts(&self) -> &PartInterner {
        &self.parts
    }

    /// Returns the rule arena.
    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Returns `true` if no part has a rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns counts for diagnostics.
    #[must_use]
    pub fn stats(&self) -> BindingStats {
        BindingStats {
            parts: self.bindings.len(),
            rules: self.rules.len(),
            chains: self.bindings.values().map(|b| b.chains.len()).sum(),
        }
    }
}

/// Recursive-descent compiler from [`OverrideTree`]s to [`CompiledBindings`].
///
/// ```rust
/// use understory_class_cascade::{BindingCompiler, OverrideNode, OverrideTree};
///
/// let tree = OverrideTree::new()
///     .part("button", OverrideNode::new().classes(["btn"]))
///     .part(
///         "menu",
///         OverrideNode::new().part("button", OverrideNode::new().add(["btn--in-menu"])),
///     );
///
/// let mut compiler = BindingCompiler::new();
/// compiler.add_tree(&tree);
/// let compiled = compiler.build();
///
/// let (_, button) = compiled.part("button").unwrap();
/// assert!(button.base().is_some());
/// assert_eq!(button.chains().len(), 1);
/// assert!(compiled.part("menu").is_none());
/// ```
#[derive(Debug, Default)]
pub struct BindingCompiler {
    parts: PartInterner,
    rules: RuleTable,
    bindings: HashMap<PartId, PartBindings>,
}

impl BindingCompiler {
    /// Creates an empty compiler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `tree`, adding its rules on top of the ones seen so far.
    pub fn add_tree(&mut self, tree: &OverrideTree) -> &mut Self {
        let mut pattern = SmallVec::<[PartId; 8]>::new();
        for (name, node) in tree.iter() {
            self.walk(&mut pattern, name, node);
        }
        self
    }

    /// Finishes compilation, ordering every part's chains by specificity.
    #[must_use]
    pub fn build(mut self) -> CompiledBindings {
        for bindings in self.bindings.values_mut() {
            // Stable: equally long chains stay in registration order.
            bindings.chains.sort_by_key(|chain| chain.pattern.len());
        }
        let compiled = CompiledBindings {
            parts: self.parts,
            rules: self.rules,
            bindings: self.bindings,
        };
        let stats = compiled.stats();
        debug!(
            parts = stats.parts,
            rules = stats.rules,
            chains = stats.chains,
            "compiled class bindings"
        );
        compiled
    }

    fn walk(&mut self, pattern: &mut SmallVec<[PartId; 8]>, name: &str, node: &OverrideNode) {
        let name = name.trim();
        if name.is_empty() {
            warn!(depth = pattern.len(), "skipping binding node with an empty part name");
            return;
        }
        let part = self.parts.intern(name);
        if let Some(spec) = node.class_spec() {
            self.update_rule(&pattern[..], part, name, spec);
        }
        pattern.push(part);
        for (child_name, child) in node.children().iter() {
            self.walk(pattern, child_name, child);
        }
        pattern.pop();
    }

    fn update_rule(&mut self, pattern: &[PartId], part: PartId, name: &str, spec: &ClassSpec) {
        let current = self
            .bindings
            .get(&part)
            .and_then(|bindings| bindings.rule_at(pattern));
        let rule = match spec {
            ClassSpec::Replace(classes) => {
                let tokens = normalize_tokens(classes);
                match current {
                    Some(id) => match self.rules.replace_in_place(id, tokens) {
                        Ok(()) => id,
                        Err(tokens) => self.rules.push(Rule::Replace(tokens)),
                    },
                    None => self.rules.push(Rule::Replace(tokens)),
                }
            }
            ClassSpec::Toggle { add, remove } => match Rule::toggle(add, remove) {
                Some(rule) => self.rules.push(rule),
                None => {
                    debug!(part = name, depth = pattern.len(), "ignoring empty class toggle");
                    return;
                }
            },
        };
        self.bindings
            .entry(part)
            .or_default()
            .set_rule_at(pattern, rule);
    }
}
