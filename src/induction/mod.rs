//! Grammar induction: from raw alternation hypotheses to a verified rule set.
//!
//! The inducer consumes candidate mappings from an external oracle, expands
//! them into atomic context-specific rules, and greedily generalizes
//! same-change rules by intersecting their triggering contexts - accepting
//! each generalization only if the resulting rule set still reproduces the
//! training corpus under a pluggable sufficiency criterion.
//!
//! - [`CandidateMapping`] / [`ContextSpec`] - the oracle's output shape
//! - [`SufficiencyCriterion`] / [`ToleranceCriterion`] - acceptance tests,
//!   with [`TolerancePrinciple`] as the stock implementation
//! - [`RuleInducer`] - the pipeline itself

pub mod criteria;
pub mod inducer;
pub mod mapping;

pub use criteria::{
    ExactCriterion, SufficiencyCriterion, ToleranceCriterion, TolerancePrinciple,
};
pub use inducer::RuleInducer;
pub use mapping::{CandidateMapping, ContextSpec};
