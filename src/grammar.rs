//! Grammars: an interface plus a rule set, driving whole-string derivation.
//!
//! A [`Grammar`] owns the symbol interface and an unordered rule list. The
//! list is the only mutable aggregate in the crate; ordering is recomputed
//! on demand by the scheduler and never cached destructively, so adding a
//! rule can never leave a stale order behind.

use std::fmt::Write as _;

use crate::error::Result;
use crate::interface::Interface;
use crate::rule::ordering::order_rules;
use crate::rule::Rule;
use crate::segment::SegmentString;

/// A full underlying-to-surface mapping: symbol interface + rule set.
#[derive(Debug, Clone)]
pub struct Grammar {
    interface: Interface,
    rules: Vec<Rule>,
}

impl Grammar {
    /// Create a grammar over `interface` with an initial rule set.
    pub fn new(interface: Interface, rules: Vec<Rule>) -> Self {
        Self { interface, rules }
    }

    /// The grammar's interface.
    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    /// The rule set, in insertion order (unordered for application).
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Add a rule to the set.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// The rule set linearized for application.
    ///
    /// Recomputed on every call; fails if the conflict graph is cyclic.
    pub fn ordered_rules(&self) -> Result<Vec<Rule>> {
        order_rules(&self.rules)
    }

    /// Derive the surface form of a symbol sequence.
    ///
    /// Encodes the underlying form through the interface, applies the
    /// ordered rules one after another across the whole string, and decodes
    /// the result through the exact-match reverse table. With an empty rule
    /// set this is the identity on any encodable input.
    pub fn derive(&self, underlying: &str) -> Result<String> {
        let encoded = self.interface.encode(underlying)?;
        let surface = derive_segments(&encoded, &self.ordered_rules()?);
        self.interface.decode(&surface)
    }

    /// Human-readable description of the ordered rule set.
    ///
    /// A reporting format for inspection, one rule per line; not a wire
    /// contract.
    pub fn describe(&self) -> Result<String> {
        let ordered = self.ordered_rules()?;
        let mut description = format!("{} rules\n", ordered.len());
        for rule in &ordered {
            // Writing to a String cannot fail.
            let _ = writeln!(description, "{rule}");
        }
        Ok(description)
    }
}

/// Apply an already-ordered rule list to a segment string, rule by rule.
///
/// Each rule is applied simultaneously across the whole string before the
/// next rule runs; this is the engine half of derivation, shared with the
/// inducer's verification loop where no symbol decoding is wanted.
pub fn derive_segments(underlying: &SegmentString, ordered_rules: &[Rule]) -> SegmentString {
    ordered_rules
        .iter()
        .fold(underlying.clone(), |string, rule| rule.apply(&string))
}
