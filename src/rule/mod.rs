//! Context-sensitive rewrite rules and their simultaneous application.
//!
//! A [`Rule`] rewrites a single segment in a one-segment window of left and
//! right context: it fires at position `i` when the left context class
//! matches the preceding segment (or boundary), the right context class
//! matches the following segment (or boundary), and the target class matches
//! the segment itself. The change is applied by priority union (insertion
//! rules) or by subtraction (deletion rules), per [`RuleKind`].
//!
//! # Simultaneity
//!
//! Application is simultaneous across the string: every firing decision and
//! every replacement reads the *original* string, so a rule never chains
//! through its own output within one application. Two adjacent matching
//! segments are both rewritten against their pre-application neighbors.

pub mod ordering;

use std::fmt;

use smallvec::SmallVec;

use crate::features::{FeatureVector, NaturalClass};
use crate::segment::SegmentString;

/// Whether a rule deletes features or inserts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    /// Feature deletion: the change is removed from the segment by
    /// [`FeatureVector::subtract`].
    Subtraction,
    /// Feature insertion: the change fills the segment's gaps by
    /// [`FeatureVector::unify`].
    Union,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Subtraction => write!(f, "subtraction"),
            RuleKind::Union => write!(f, "union"),
        }
    }
}

/// One context-sensitive rewrite: target class, change vector, operation
/// kind, and optional left/right triggering classes.
///
/// Contexts default to the empty class, which matches anything. Two rules
/// are equal iff all structural fields agree. Rules are values: the engine
/// consumes them, never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    /// The class of segments the rule rewrites.
    pub target: NaturalClass,
    /// The features deleted from or inserted into a firing segment.
    pub change: FeatureVector,
    /// Deletion or insertion.
    pub kind: RuleKind,
    /// Class the preceding segment must match; empty means unconditioned.
    pub left: NaturalClass,
    /// Class the following segment must match; empty means unconditioned.
    pub right: NaturalClass,
}

impl Rule {
    /// A context-free rule: fires wherever the target matches.
    pub fn unconditioned(target: NaturalClass, change: FeatureVector, kind: RuleKind) -> Self {
        Self::new(target, change, kind, NaturalClass::any(), NaturalClass::any())
    }

    /// A rule with explicit left and right triggering classes.
    pub fn new(
        target: NaturalClass,
        change: FeatureVector,
        kind: RuleKind,
        left: NaturalClass,
        right: NaturalClass,
    ) -> Self {
        Self {
            target,
            change,
            kind,
            left,
            right,
        }
    }

    /// Whether the rule fires at position `index` of `string`.
    #[inline]
    pub fn fires_at(&self, string: &SegmentString, index: usize) -> bool {
        self.left.matches(string.previous(index))
            && self.right.matches(string.next(index))
            && self.target.matches(&string[index])
    }

    /// Apply the rule simultaneously across `string`.
    ///
    /// Returns a new string of the same length. Firing positions are
    /// collected against the original string first, then rewritten, so one
    /// position's change never feeds another's firing decision.
    pub fn apply(&self, string: &SegmentString) -> SegmentString {
        let firing: SmallVec<[usize; 8]> = (0..string.len())
            .filter(|&i| self.fires_at(string, i))
            .collect();
        let mut result = string.clone();
        for index in firing {
            let rewritten = match self.kind {
                RuleKind::Union => string[index].unify(&self.change),
                RuleKind::Subtraction => string[index].subtract(&self.change),
            };
            result.replace(index, rewritten);
        }
        result
    }

    /// Total context specificity: left plus right cardinality.
    ///
    /// The scheduler uses this to direct conflict edges - the more narrowly
    /// contextualized of two conflicting rules is ordered later.
    #[inline]
    pub fn context_specificity(&self) -> usize {
        self.left.cardinality() + self.right.cardinality()
    }

    /// Whether the two rules' changes disagree on some feature.
    pub fn contradicts(&self, other: &Rule) -> bool {
        self.change
            .iter()
            .any(|(feature, value)| value * other.change.value(feature) == -1)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} / {} __ {} ({})",
            self.target, self.change, self.left, self.right, self.kind
        )
    }
}
