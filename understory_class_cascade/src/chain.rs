// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor-chain patterns and matching.
//!
//! A [`ChainPattern`] matches a component path when its parts occur in the
//! path in the same relative order. Unrelated ancestors may sit between the
//! matched ones, so `[menu, button]` matches `[menu, menu-item, button]` but
//! not `[button, menu]`.

use smallvec::SmallVec;

use crate::intern::PartId;
use crate::rule::RuleId;

/// Inline capacity for chain patterns; deeper patterns spill to the heap.
const INLINE_PATTERN: usize = 4;

/// An ordered ancestor pattern, outermost part first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChainPattern(SmallVec<[PartId; INLINE_PATTERN]>);

impl ChainPattern {
    /// Builds a pattern from part ids, outermost first.
    #[must_use]
    pub fn from_parts(parts: impl IntoIterator<Item = PartId>) -> Self {
        Self(parts.into_iter().collect())
    }

    /// Returns the number of parts in the pattern.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty pattern.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the parts as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PartId] {
        &self.0
    }

    /// Returns `true` if this pattern is an ordered subsequence of `path`.
    ///
    /// `path` holds one entry per ancestor; `None` stands for a name that was
    /// never registered and can therefore match nothing.
    #[must_use]
    pub fn matches(&self, path: &[Option<PartId>]) -> bool {
        is_ordered_subsequence(self.as_slice(), path)
    }
}

/// A resolved path entry equals a pattern part only if it is that part.
impl PartialEq<PartId> for Option<PartId> {
    fn eq(&self, other: &PartId) -> bool {
        *self == Some(*other)
    }
}

/// A rule scoped to a part appearing under a [`ChainPattern`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainRule {
    pub(crate) pattern: ChainPattern,
    pub(crate) rule: RuleId,
}

impl ChainRule {
    /// Returns the ancestor pattern.
    #[must_use]
    pub fn pattern(&self) -> &ChainPattern {
        &self.pattern
    }

    /// Returns the rule applied when the pattern matches.
    #[must_use]
    pub fn rule(&self) -> RuleId {
        self.rule
    }
}

/// Returns `true` if `needles` occur in `haystack` in order, not necessarily
/// contiguously.
///
/// Each needle is matched at the earliest position after the previous match,
/// which is sufficient: an earlier match never rules out a later one.
///
/// ```rust
/// use understory_class_cascade::is_ordered_subsequence;
///
/// assert!(is_ordered_subsequence(&["a", "b"], &["a", "x", "b"]));
/// assert!(!is_ordered_subsequence(&["a", "b"], &["b", "a"]));
/// assert!(is_ordered_subsequence::<&str, &str>(&[], &[]));
/// ```
#[must_use]
pub fn is_ordered_subsequence<N, H>(needles: &[N], haystack: &[H]) -> bool
where
    H: PartialEq<N>,
{
    let mut rest = haystack.iter();
    needles
        .iter()
        .all(|needle| rest.any(|candidate| candidate == needle))
}
