//! Ternary feature vectors and the algebra over them.
//!
//! A [`FeatureVector`] assigns each phonological feature one of three values:
//! `+1` (positive), `-1` (negative), or underspecified. Underspecification is
//! represented by *absence*: a vector never stores the value `0`, and
//! [`FeatureVector::value`] returns `0` for any feature it does not carry.
//! This single convention removes the classic ambiguity between "feature
//! mapped to zero" and "feature missing from the map".
//!
//! # Operations
//!
//! Four operations make up the algebra:
//!
//! - [`FeatureVector::subtract`] - delete features that agree with a
//!   reference vector (feature deletion)
//! - [`FeatureVector::unify`] - priority union: fill underspecified features
//!   from a second vector, no-op on hard conflict (feature insertion)
//! - [`FeatureVector::to_subtract`] - the features that must be deleted from
//!   one segment to reach its shared core with another
//! - [`FeatureVector::to_unify`] - the features that must then be added to
//!   reach the other segment
//!
//! Together, `to_subtract` and `to_unify` decompose an observed segment
//! alternation into a deletion step followed by an insertion step, each
//! independently expressible as a rewrite rule.
//!
//! All operations return fresh vectors; existing vectors are never mutated.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// The feature that distinguishes true segments from the word boundary.
pub const SEGMENT_FEATURE: &str = "segment";

/// The word-boundary vector: `-segment` and nothing else.
///
/// Process-wide and immutable. Neighbor lookups past either end of a
/// [`SegmentString`](crate::segment::SegmentString) resolve to this vector,
/// so edge-of-word contexts are expressed as ordinary natural classes over
/// the `segment` feature. The interface's symbol rows never produce it; it
/// is reachable only through the reserved boundary symbol.
pub static WORD_BOUNDARY: LazyLock<FeatureVector> =
    LazyLock::new(|| FeatureVector::from_specs(&[(SEGMENT_FEATURE, -1)]));

/// A hashable, canonically ordered rendering of a vector's specified features.
///
/// Used wherever vectors key a map: the interface's reverse symbol table and
/// the inducer's change buckets.
pub type FeatureKey = Vec<(String, i8)>;

/// A ternary-valued assignment of features for one segment or one change.
///
/// Only the values `+1` and `-1` are ever stored; every feature not present
/// in the map is underspecified. See the module docs for the conventions and
/// the algebra.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureVector {
    values: FxHashMap<String, i8>,
}

impl FeatureVector {
    /// Create an empty (fully underspecified) vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vector from `(feature, value)` pairs.
    ///
    /// Values are clamped to their sign; zeros are skipped entirely, keeping
    /// the no-stored-zero invariant.
    pub fn from_specs(specs: &[(&str, i8)]) -> Self {
        let mut vector = Self::new();
        for &(feature, value) in specs {
            vector.set(feature, value);
        }
        vector
    }

    /// Set a feature to the sign of `value`; a zero value removes the feature.
    pub fn set(&mut self, feature: &str, value: i8) {
        if value == 0 {
            self.values.remove(feature);
        } else {
            self.values.insert(feature.to_string(), value.signum());
        }
    }

    /// The value of `feature`: `+1`, `-1`, or `0` when underspecified.
    ///
    /// This is the total view of the vector: every vector is implicitly
    /// defined over any feature inventory, with unlisted features at `0`.
    #[inline]
    pub fn value(&self, feature: &str) -> i8 {
        self.values.get(feature).copied().unwrap_or(0)
    }

    /// Whether `feature` is specified (stored with a nonzero value).
    #[inline]
    pub fn specifies(&self, feature: &str) -> bool {
        self.values.contains_key(feature)
    }

    /// Number of specified features.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no feature is specified.
    ///
    /// An empty change vector describes a no-op rule; the inducer discards
    /// such rules at lift time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the specified features and their values, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i8)> {
        self.values.iter().map(|(f, &v)| (f.as_str(), v))
    }

    /// The canonically ordered `(feature, value)` list for this vector.
    ///
    /// Two vectors are equal exactly when their keys are equal, so the key
    /// serves as an exact-match lookup handle in hash tables.
    pub fn key(&self) -> FeatureKey {
        let mut key: FeatureKey = self
            .values
            .iter()
            .map(|(f, &v)| (f.clone(), v))
            .collect();
        key.sort();
        key
    }

    // ------------------------------------------------------------------
    // The algebra
    // ------------------------------------------------------------------

    /// Subtraction: delete every feature on which `self` and `other` agree.
    ///
    /// For each feature of `other`, if `self` carries it with the identical
    /// value, the result leaves it underspecified; all other features of
    /// `self` are kept unchanged. Features of `other` that `self` does not
    /// carry are already underspecified, so deleting them is a no-op and the
    /// operation is total.
    ///
    /// Models feature deletion driven by agreement with a reference vector:
    /// `x.subtract(&x)` is the empty vector.
    pub fn subtract(&self, other: &FeatureVector) -> FeatureVector {
        let mut result = self.clone();
        for (feature, value) in other.iter() {
            if self.value(feature) == value {
                result.values.remove(feature);
            }
        }
        result
    }

    /// Priority union, with an explicit feasibility flag.
    ///
    /// If any feature is `+1` in one vector and `-1` in the other, the union
    /// is infeasible: the result is `self` unchanged and the flag is `false`.
    /// Otherwise every feature of `other` that `self` leaves underspecified
    /// is copied in; features `self` already specifies keep their value.
    ///
    /// Encodes "`self`'s specified features take priority; `other` fills the
    /// gaps".
    pub fn unify_checked(&self, other: &FeatureVector) -> (FeatureVector, bool) {
        for (feature, value) in other.iter() {
            if self.value(feature) * value == -1 {
                return (self.clone(), false);
            }
        }
        let mut result = self.clone();
        for (feature, value) in other.iter() {
            if !self.specifies(feature) {
                result.set(feature, value);
            }
        }
        (result, true)
    }

    /// Priority union, absorbing infeasibility as a no-op.
    ///
    /// See [`FeatureVector::unify_checked`] for the conflict semantics; rule
    /// application uses this form, where a hard conflict simply leaves the
    /// segment untouched.
    pub fn unify(&self, other: &FeatureVector) -> FeatureVector {
        self.unify_checked(other).0
    }

    /// The features that must be deleted from `self` to reach its shared
    /// core with `other`.
    ///
    /// Every specified feature of `self` whose value does not agree with
    /// `other`'s (absent counting as `0`, so disagreement or absence both
    /// qualify) is included with `self`'s value.
    pub fn to_subtract(&self, other: &FeatureVector) -> FeatureVector {
        let mut change = FeatureVector::new();
        for (feature, value) in self.iter() {
            if value * other.value(feature) != 1 {
                change.set(feature, value);
            }
        }
        change
    }

    /// The features that must be added to `self` to reach `other`.
    ///
    /// Every specified feature of `other` that `self` leaves underspecified
    /// is included with `other`'s value. Applied after
    /// [`FeatureVector::to_subtract`], this completes the deletion/insertion
    /// decomposition of a segment alternation.
    pub fn to_unify(&self, other: &FeatureVector) -> FeatureVector {
        let mut change = FeatureVector::new();
        for (feature, value) in other.iter() {
            if !self.specifies(feature) {
                change.set(feature, value);
            }
        }
        change
    }

    /// Render the specified features as sorted `+feature` / `-feature` terms.
    pub fn spec_terms(&self) -> Vec<String> {
        self.key()
            .into_iter()
            .map(|(feature, value)| {
                let sign = if value > 0 { '+' } else { '-' };
                format!("{sign}{feature}")
            })
            .collect()
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.spec_terms().join(";"))
    }
}
