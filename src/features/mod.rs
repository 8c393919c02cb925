//! Feature vectors, the algebra over them, and natural classes.
//!
//! This is the foundation the rest of the crate builds on:
//!
//! - [`FeatureVector`] - a ternary feature assignment with the subtraction
//!   and priority-union operators
//! - [`NaturalClass`] - a feature vector specialized as a partial-match
//!   predicate over segments
//! - [`WORD_BOUNDARY`] - the process-wide `-segment` singleton used for
//!   edge-of-word contexts

pub mod class;
pub mod vector;

pub use class::NaturalClass;
pub use vector::{FeatureKey, FeatureVector, SEGMENT_FEATURE, WORD_BOUNDARY};
