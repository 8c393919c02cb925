//! Error types for phonological derivation and rule induction.

use thiserror::Error;

/// Errors that can occur while deriving surface forms or inducing rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhonologyError {
    /// A candidate mapping's combined context window is wider than one segment.
    ///
    /// Rules are restricted to a one-segment target with at most one context
    /// segment across both sides. Wider windows cannot be expressed and are a
    /// configuration error, not a recoverable condition.
    #[error("context window of {0} segments exceeds the supported one-segment limit")]
    WindowTooWide(usize),

    /// A symbol has no entry in the feature table.
    ///
    /// Raised when encoding an underlying form whose symbol was never
    /// cataloged by the interface.
    #[error("symbol {0:?} is not in the feature table")]
    UnknownSymbol(char),

    /// A derived segment has no exact match in the reverse symbol table.
    ///
    /// Decoding requires an exact, total match on the segment's specified
    /// features; partial vectors that correspond to no cataloged symbol
    /// cannot be rendered back to a surface symbol.
    #[error("no symbol matches the derived segment {0}")]
    NoSymbolForSegment(String),

    /// The rule set's conflict graph contains a cycle.
    ///
    /// Mutually contradictory rules with inconsistent specificity ordering
    /// admit no linearization; the scheduler surfaces this explicitly rather
    /// than dropping or arbitrarily resolving edges.
    #[error("rule set cannot be ordered: conflict graph contains a cycle")]
    UnorderableRuleSet,

    /// A feature-table row does not match the header.
    #[error("malformed feature table at line {line}: {reason}")]
    MalformedFeatureTable {
        /// 1-based line number of the offending row.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },
}

/// A specialized `Result` type for phonological operations.
pub type Result<T> = std::result::Result<T, PhonologyError>;
