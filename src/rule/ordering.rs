//! Rule scheduling: conflict graphs and topological linearization.
//!
//! Rules in a grammar are unordered until derivation time. Two rules
//! *conflict* when their change vectors disagree on some feature while their
//! targets could still pick out the same segment (the targets do not
//! contradict). Each conflicting pair contributes a directed edge from the
//! rule with the lower total context specificity to the rule with the higher
//! one: the general rule applies first and the narrowly contextualized rule
//! takes effect around it. Ties in specificity contribute no edge.
//!
//! The resulting graph is linearized by topological sort, always taking the
//! lowest-index ready node first so that rules without mutual constraints
//! come out in input order (the whole induction pipeline relies on stable
//! input order for reproducibility). A cyclic graph means the rule set
//! admits no consistent order; that is surfaced as
//! [`PhonologyError::UnorderableRuleSet`] rather than resolved arbitrarily.
//!
//! As a coarse global policy, all deletion rules are scheduled before all
//! insertion rules; both groups get the same conflict-graph treatment
//! internally.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use petgraph::graph::DiGraph;
use petgraph::Direction;

use super::{Rule, RuleKind};
use crate::error::{PhonologyError, Result};

/// Linearize a rule set for derivation.
///
/// Partitions the rules into deletion and insertion groups (input order
/// preserved within each), orders each group by its conflict graph, and
/// concatenates deletions before insertions.
pub fn order_rules(rules: &[Rule]) -> Result<Vec<Rule>> {
    let (subtractions, unions): (Vec<Rule>, Vec<Rule>) = rules
        .iter()
        .cloned()
        .partition(|rule| rule.kind == RuleKind::Subtraction);
    let mut ordered = order_by_scope(subtractions)?;
    ordered.extend(order_by_scope(unions)?);
    Ok(ordered)
}

/// Order one kind-group of rules by its conflict graph.
///
/// With fewer than two rules there is nothing to order. Linearization is
/// Kahn's algorithm over the conflict graph, breaking ties by taking the
/// lowest input index among the ready nodes, which yields the unique
/// lexicographically-least topological order. If the queue drains before
/// every rule is placed, the graph has a cycle.
fn order_by_scope(rules: Vec<Rule>) -> Result<Vec<Rule>> {
    if rules.len() <= 1 {
        return Ok(rules);
    }

    let mut graph = DiGraph::<usize, ()>::new();
    let nodes: Vec<_> = (0..rules.len()).map(|i| graph.add_node(i)).collect();

    for i in 0..rules.len() {
        for j in (i + 1)..rules.len() {
            if !conflicts(&rules[i], &rules[j]) {
                continue;
            }
            let (si, sj) = (
                rules[i].context_specificity(),
                rules[j].context_specificity(),
            );
            if si < sj {
                graph.add_edge(nodes[i], nodes[j], ());
            } else if sj < si {
                graph.add_edge(nodes[j], nodes[i], ());
            }
        }
    }

    let mut indegree: Vec<usize> = nodes
        .iter()
        .map(|&node| graph.neighbors_directed(node, Direction::Incoming).count())
        .collect();
    let mut ready: BinaryHeap<Reverse<usize>> = indegree
        .iter()
        .enumerate()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut ordered = Vec::with_capacity(rules.len());
    while let Some(Reverse(i)) = ready.pop() {
        ordered.push(rules[i].clone());
        for successor in graph.neighbors(nodes[i]) {
            let j = graph[successor];
            indegree[j] -= 1;
            if indegree[j] == 0 {
                ready.push(Reverse(j));
            }
        }
    }

    if ordered.len() != rules.len() {
        return Err(PhonologyError::UnorderableRuleSet);
    }
    Ok(ordered)
}

/// Whether an ordering constraint exists between two rules.
///
/// The changes must disagree on some feature, and the targets must not
/// already contradict - two rules that can never fire on the same segment
/// need no relative order.
fn conflicts(a: &Rule, b: &Rule) -> bool {
    a.contradicts(b) && !a.target.contradicts(&b.target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureVector, NaturalClass};

    fn union_rule(change: i8, left: &[(&str, i8)], right: &[(&str, i8)]) -> Rule {
        Rule::new(
            NaturalClass::any(),
            FeatureVector::from_specs(&[("voi", change)]),
            RuleKind::Union,
            NaturalClass::from_specs(left),
            NaturalClass::from_specs(right),
        )
    }

    #[test]
    fn subtractions_precede_unions() {
        let union = Rule::unconditioned(
            NaturalClass::any(),
            FeatureVector::from_specs(&[("voi", -1)]),
            RuleKind::Union,
        );
        let subtraction = Rule::unconditioned(
            NaturalClass::from_specs(&[("voi", 1)]),
            FeatureVector::from_specs(&[("voi", 1)]),
            RuleKind::Subtraction,
        );
        let ordered = order_rules(&[union.clone(), subtraction.clone()]).unwrap();
        assert_eq!(ordered, vec![subtraction, union]);
    }

    #[test]
    fn general_conflicting_rule_comes_first() {
        let specific = union_rule(1, &[("nas", 1)], &[("cons", 1)]);
        let general = union_rule(-1, &[], &[]);
        let ordered = order_rules(&[specific.clone(), general.clone()]).unwrap();
        assert_eq!(ordered, vec![general, specific]);
    }

    #[test]
    fn contradicting_targets_need_no_order() {
        let mut a = union_rule(1, &[("nas", 1)], &[]);
        a.target = NaturalClass::from_specs(&[("cons", 1)]);
        let mut b = union_rule(-1, &[], &[]);
        b.target = NaturalClass::from_specs(&[("cons", -1)]);
        // No conflict edge: input order is preserved even though the less
        // specific rule comes second.
        let ordered = order_rules(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(ordered, vec![a, b]);
    }

    #[test]
    fn nonconflicting_rules_keep_input_order() {
        let first = union_rule(1, &[("nas", 1)], &[]);
        let second = {
            let mut rule = union_rule(1, &[], &[]);
            rule.change = FeatureVector::from_specs(&[("nas", 1)]);
            rule
        };
        let ordered = order_rules(&[first.clone(), second.clone()]).unwrap();
        assert_eq!(ordered, vec![first, second]);
    }

    #[test]
    fn pairwise_conflicts_order_by_specificity() {
        // Three mutually conflicting rules with distinct specificities must
        // come out most-general-first regardless of input order. Note the
        // edge policy (strictly lower specificity -> higher) embeds in the
        // integers, so this graph is always acyclic; the cycle error exists
        // for future edge policies, not for this one.
        let narrow = union_rule(1, &[("nas", 1)], &[("cons", 1)]);
        let middle = union_rule(-1, &[("nas", 1)], &[]);
        let wide = union_rule(1, &[], &[]);
        // middle and wide conflict with each other and with narrow, but
        // narrow/wide share the +voi change; give narrow a second feature so
        // every pair disagrees somewhere.
        let mut narrow = narrow;
        narrow.change = FeatureVector::from_specs(&[("voi", 1), ("nas", -1)]);
        let mut wide = wide;
        wide.change = FeatureVector::from_specs(&[("voi", 1), ("nas", 1)]);

        let ordered = order_rules(&[narrow.clone(), middle.clone(), wide.clone()]).unwrap();
        assert_eq!(ordered, vec![wide, middle, narrow]);
    }
}
