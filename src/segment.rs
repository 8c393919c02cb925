//! Segment strings: ordered sequences of feature vectors.
//!
//! A [`SegmentString`] is what rules rewrite. Its one piece of domain logic
//! is boundary-aware neighbor lookup: asking for the segment before position
//! `0` or after the last position yields the [`WORD_BOUNDARY`] vector instead
//! of failing, so word-edge contexts need no special casing in rule
//! application.

use std::fmt;
use std::ops::Index;

use crate::features::{FeatureVector, WORD_BOUNDARY};

/// An ordered sequence of feature vectors, one per segment.
///
/// Equality is element-wise and length-sensitive. The string itself is a
/// value: rule application produces a new string of the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentString {
    segments: Vec<FeatureVector>,
}

impl SegmentString {
    /// Create an empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if the string has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment before position `index`, or the word boundary at the
    /// left edge.
    #[inline]
    pub fn previous(&self, index: usize) -> &FeatureVector {
        if index == 0 {
            &WORD_BOUNDARY
        } else {
            &self.segments[index - 1]
        }
    }

    /// The segment after position `index`, or the word boundary at the
    /// right edge.
    #[inline]
    pub fn next(&self, index: usize) -> &FeatureVector {
        if index + 1 >= self.segments.len() {
            &WORD_BOUNDARY
        } else {
            &self.segments[index + 1]
        }
    }

    /// Replace the segment at `index`.
    pub(crate) fn replace(&mut self, index: usize, segment: FeatureVector) {
        self.segments[index] = segment;
    }

    /// Iterate over the segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureVector> {
        self.segments.iter()
    }
}

impl Index<usize> for SegmentString {
    type Output = FeatureVector;

    fn index(&self, index: usize) -> &FeatureVector {
        &self.segments[index]
    }
}

impl FromIterator<FeatureVector> for SegmentString {
    fn from_iter<I: IntoIterator<Item = FeatureVector>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<FeatureVector>> for SegmentString {
    fn from(segments: Vec<FeatureVector>) -> Self {
        Self { segments }
    }
}

impl<'a> IntoIterator for &'a SegmentString {
    type Item = &'a FeatureVector;
    type IntoIter = std::slice::Iter<'a, FeatureVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for SegmentString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
