//! Candidate mappings: the raw alternation hypotheses the inducer consumes.
//!
//! An upstream mapping-extraction oracle proposes segment-to-segment
//! alternations with positional context. This module defines only the shape
//! consumed - how the oracle computes mappings is its own business - and the
//! flattening step that expands set-valued contexts into atomic
//! `(input, output, left, right)` tuples.

use crate::error::{PhonologyError, Result};

/// One side of a candidate mapping's context window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum ContextSpec {
    /// No constraint on this side.
    Wildcard,
    /// One context position, filled by any of these trigger symbols.
    ///
    /// A single segment is the one-element case. The boundary symbol is a
    /// legitimate trigger: it stands for the word edge.
    OneOf(Vec<char>),
}

impl ContextSpec {
    /// A single-segment context.
    pub fn segment(symbol: char) -> Self {
        ContextSpec::OneOf(vec![symbol])
    }

    /// Number of context positions this side occupies (0 or 1).
    pub fn width(&self) -> usize {
        match self {
            ContextSpec::Wildcard => 0,
            ContextSpec::OneOf(_) => 1,
        }
    }
}

/// A raw alternation hypothesis: input symbol, output symbol, and an
/// optional context window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateMapping {
    /// The alternating segment as it appears underlyingly.
    pub input: char,
    /// The segment it surfaces as.
    pub output: char,
    /// Context to the left of the alternating segment.
    pub left: ContextSpec,
    /// Context to the right of the alternating segment.
    pub right: ContextSpec,
}

impl CandidateMapping {
    /// An unconditioned mapping.
    pub fn unconditioned(input: char, output: char) -> Self {
        Self {
            input,
            output,
            left: ContextSpec::Wildcard,
            right: ContextSpec::Wildcard,
        }
    }
}

/// An atomic, fully ground alternation: one trigger (or none) per side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AtomicMapping {
    pub input: char,
    pub output: char,
    pub left: Option<char>,
    pub right: Option<char>,
}

/// Expand a candidate mapping into the cartesian product of its possible
/// triggers.
///
/// Fails with [`PhonologyError::WindowTooWide`] when the combined context
/// window exceeds one segment; wider generalizations are unsupported.
pub(crate) fn flatten(mapping: &CandidateMapping) -> Result<Vec<AtomicMapping>> {
    let window = mapping.left.width() + mapping.right.width();
    if window > 1 {
        return Err(PhonologyError::WindowTooWide(window));
    }

    let sides = |spec: &ContextSpec| -> Vec<Option<char>> {
        match spec {
            ContextSpec::Wildcard => vec![None],
            ContextSpec::OneOf(symbols) => symbols.iter().map(|&c| Some(c)).collect(),
        }
    };

    let mut atomic = Vec::new();
    for &left in &sides(&mapping.left) {
        for &right in &sides(&mapping.right) {
            atomic.push(AtomicMapping {
                input: mapping.input,
                output: mapping.output,
                left,
                right,
            });
        }
    }
    Ok(atomic)
}
