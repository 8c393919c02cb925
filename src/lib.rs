//! # phonolearn
//!
//! Phonological alternation as a rewriting grammar over feature-valued
//! segments, and induction of such grammars from surface data.
//!
//! The engine side maps symbol sequences onto strings of ternary feature
//! vectors, applies context-sensitive rewrite rules simultaneously across
//! each string in a scheduled order, and maps the result back to symbols.
//! The induction side consumes raw segment-alternation hypotheses, lifts
//! each into a feature-deletion/feature-insertion rule pair, and greedily
//! generalizes same-change rules while a sufficiency criterion keeps the
//! training corpus derivable.
//!
//! The rule formalism follows Logical Phonology: a one-segment target with
//! one-segment left/right context, rewriting by feature subtraction and
//! priority union rather than wholesale symbol replacement.
//!
//! ## Example
//!
//! ```rust,ignore
//! use phonolearn::prelude::*;
//!
//! let interface = Interface::from_tsv(table)?;
//! let inducer = RuleInducer::new(interface, &pairs, TolerancePrinciple)?;
//! let grammar = inducer.induce(&mappings)?;
//!
//! assert_eq!(grammar.derive("aba")?, "apa");
//! println!("{}", grammar.describe()?);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod features;
pub mod grammar;
pub mod induction;
pub mod interface;
pub mod rule;
pub mod segment;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::error::{PhonologyError, Result};
    pub use crate::features::{FeatureVector, NaturalClass, WORD_BOUNDARY};
    pub use crate::grammar::Grammar;
    pub use crate::induction::{
        CandidateMapping, ContextSpec, RuleInducer, SufficiencyCriterion, ToleranceCriterion,
        TolerancePrinciple,
    };
    pub use crate::interface::{Interface, BOUNDARY_SYMBOL};
    pub use crate::rule::{Rule, RuleKind};
    pub use crate::segment::SegmentString;
}
