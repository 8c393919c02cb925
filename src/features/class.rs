//! Natural classes: feature vectors used as segment predicates.
//!
//! A natural class is intensionally defined - it is a [`FeatureVector`] whose
//! specified features constrain membership, while underspecified features are
//! wildcards. The empty class specifies nothing and therefore matches every
//! segment, including the word boundary; it is the identity element and the
//! default context of a rule.

use std::fmt;

use super::vector::FeatureVector;

/// A partial-match predicate over segments.
///
/// Wraps a [`FeatureVector`]; only its specified (±1) features participate in
/// matching. Cardinality (the number of specified features) measures how
/// narrow the class is and breaks ties when the scheduler orders conflicting
/// rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct NaturalClass {
    features: FeatureVector,
}

impl NaturalClass {
    /// The empty class: matches every segment.
    pub fn any() -> Self {
        Self::default()
    }

    /// The class containing exactly the segments that share all of this
    /// segment's specified features (a singleton class for a fully
    /// specified inventory).
    pub fn from_segment(segment: &FeatureVector) -> Self {
        Self {
            features: segment.clone(),
        }
    }

    /// Build a class from `(feature, value)` pairs.
    pub fn from_specs(specs: &[(&str, i8)]) -> Self {
        Self {
            features: FeatureVector::from_specs(specs),
        }
    }

    /// The underlying feature vector.
    #[inline]
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// Number of specified features; the class's specificity measure.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.features.len()
    }

    /// True iff every specified feature of the class appears in `segment`
    /// with the identical value.
    ///
    /// Underspecified features never constrain, so [`NaturalClass::any`]
    /// matches everything.
    pub fn matches(&self, segment: &FeatureVector) -> bool {
        self.features
            .iter()
            .all(|(feature, value)| segment.value(feature) == value)
    }

    /// The greatest lower bound under agreement: keep only features that
    /// both classes specify with the identical value.
    ///
    /// Commutative and idempotent. Intersection is how the inducer
    /// generalizes two rules into one covering both triggering environments.
    pub fn intersection(&self, other: &NaturalClass) -> NaturalClass {
        let mut features = FeatureVector::new();
        for (feature, value) in self.features.iter() {
            if other.features.value(feature) == value {
                features.set(feature, value);
            }
        }
        NaturalClass { features }
    }

    /// True iff some shared feature has opposite sign across the two classes,
    /// i.e. no segment can belong to both.
    pub fn contradicts(&self, other: &NaturalClass) -> bool {
        self.features
            .iter()
            .any(|(feature, value)| value * other.features.value(feature) == -1)
    }
}

impl From<FeatureVector> for NaturalClass {
    fn from(features: FeatureVector) -> Self {
        Self { features }
    }
}

impl fmt::Display for NaturalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.features.spec_terms().join(";"))
    }
}
