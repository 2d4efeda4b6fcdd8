// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rules and the rule arena.
//!
//! A binding slot never holds rule content directly. It holds a [`RuleId`]
//! into a [`RuleTable`], so a slot that is re-declared with another full list
//! can overwrite its rule in place while every other slot keeps its own rule.

use core::fmt;

/// Class tokens owned by a rule.
///
/// Tokens are trimmed, non-empty and unique.
pub type ClassTokens = Box<[Box<str>]>;

/// An opaque handle to a [`Rule`] in a [`RuleTable`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(u32);

impl RuleId {
    /// Returns the underlying arena index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RuleId").field(&self.0).finish()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule-{}", self.0)
    }
}

/// The effect of a rule on an accumulated class list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Discard the accumulated list and use these tokens instead.
    Replace(ClassTokens),
    /// Append each missing `add` token, then delete each `remove` token.
    Toggle {
        /// Appended when not already present.
        add: ClassTokens,
        /// Deleted when present.
        remove: ClassTokens,
    },
}

impl Rule {
    /// Builds a replacement rule from raw tokens.
    #[must_use]
    pub fn replace<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Replace(normalize_tokens(classes))
    }

    /// Builds a toggle rule from raw tokens.
    ///
    /// Returns `None` when both sides are empty after normalization.
    #[must_use]
    pub fn toggle<A, R, S, T>(add: A, remove: R) -> Option<Self>
    where
        A: IntoIterator<Item = S>,
        R: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let add = normalize_tokens(add);
        let remove = normalize_tokens(remove);
        if add.is_empty() && remove.is_empty() {
            return None;
        }
        Some(Self::Toggle { add, remove })
    }

    /// Applies this rule to `classes`.
    ///
    /// Existing tokens keep their relative order.
    pub fn apply(&self, classes: &mut Vec<String>) {
        match self {
            Self::Replace(tokens) => {
                classes.clear();
                classes.extend(tokens.iter().map(|token| String::from(&**token)));
            }
            Self::Toggle { add, remove } => {
                for token in add.iter() {
                    if !classes.iter().any(|class| class == &**token) {
                        classes.push(String::from(&**token));
                    }
                }
                for token in remove.iter() {
                    classes.retain(|class| class != &**token);
                }
            }
        }
    }
}

/// Arena of rules addressed by [`RuleId`].
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Stores `rule` under a fresh id.
    pub fn push(&mut self, rule: Rule) -> RuleId {
        let id = RuleId(u32::try_from(self.rules.len()).expect("too many rules for RuleId (u32)"));
        self.rules.push(rule);
        id
    }

    /// Returns the rule for `id`.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0 as usize)
    }

    /// Overwrites the tokens of an existing replacement rule.
    ///
    /// Returns the tokens back when `id` is unknown or names a toggle rule,
    /// leaving the table unchanged.
    pub fn replace_in_place(&mut self, id: RuleId, tokens: ClassTokens) -> Result<(), ClassTokens> {
        match self.rules.get_mut(id.0 as usize) {
            Some(Rule::Replace(current)) => {
                *current = tokens;
                Ok(())
            }
            _ => Err(tokens),
        }
    }

    /// Applies the rule `id` to `classes`. Unknown ids leave `classes` as is.
    pub fn apply(&self, id: RuleId, classes: &mut Vec<String>) {
        if let Some(rule) = self.get(id) {
            rule.apply(classes);
        }
    }
}

/// Trims tokens, drops empty ones and keeps the first of any duplicates.
pub(crate) fn normalize_tokens<I, S>(tokens: I) -> ClassTokens
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<Box<str>> = Vec::new();
    for token in tokens {
        let token = token.as_ref().trim();
        if !token.is_empty() && !out.iter().any(|seen| &**seen == token) {
            out.push(token.into());
        }
    }
    out.into_boxed_slice()
}
