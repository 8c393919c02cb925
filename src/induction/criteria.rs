//! Acceptance criteria for generalization.
//!
//! The inducer never decides for itself whether a merged rule is "good
//! enough"; it consults a [`SufficiencyCriterion`] over the corpus-wide
//! success count. The criteria are statistical black boxes from the
//! engine's point of view - any implementation of the traits will do - but
//! the stock [`TolerancePrinciple`] (Yang's `n / ln n` threshold) is
//! provided since it is the test the learning literature actually uses.

/// Decides whether a number of exceptions is tolerable for a generalization
/// over `total` items.
pub trait ToleranceCriterion {
    /// True iff a generalization with `exceptions` counterexamples out of
    /// `total` opportunities should be kept.
    fn tolerates(&self, total: usize, exceptions: usize) -> bool;
}

/// Decides whether `correct` successful derivations out of `total` training
/// pairs is sufficient evidence to adopt a rule set.
pub trait SufficiencyCriterion {
    /// True iff a rule set deriving `correct` of `total` pairs correctly
    /// should be accepted.
    fn is_sufficient(&self, total: usize, correct: usize) -> bool;
}

/// Yang's tolerance/sufficiency principle: up to `n / ln n` exceptions are
/// tolerated among `n` items.
///
/// For n ≤ 1 the threshold degenerates; a single item tolerates no
/// exceptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TolerancePrinciple;

impl TolerancePrinciple {
    fn threshold(total: usize) -> f64 {
        if total <= 1 {
            0.0
        } else {
            total as f64 / (total as f64).ln()
        }
    }
}

impl ToleranceCriterion for TolerancePrinciple {
    fn tolerates(&self, total: usize, exceptions: usize) -> bool {
        exceptions as f64 <= Self::threshold(total)
    }
}

impl SufficiencyCriterion for TolerancePrinciple {
    fn is_sufficient(&self, total: usize, correct: usize) -> bool {
        let exceptions = total.saturating_sub(correct);
        self.tolerates(total, exceptions)
    }
}

/// The strictest criterion: every training pair must derive correctly.
///
/// Useful for small, noise-free corpora and in tests, where any tolerated
/// exception would mask an over-general merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactCriterion;

impl SufficiencyCriterion for ExactCriterion {
    fn is_sufficient(&self, total: usize, correct: usize) -> bool {
        correct == total
    }
}
