//! Robinson's unification algorithm, naive recursive formulation
//!
//! Bindings are applied eagerly: every recursive step first applies the
//! substitution accumulated so far to both sides, so remaining argument
//! pairs always see up-to-date terms. The repeated application is what makes
//! this the exponential worst-case baseline that the other strategies
//! improve on.

use log::{debug, trace};

use crate::syntax::{TermGraph, TermId, TermKind, TermPair};

use super::algorithm::UnificationResult;
use super::substitution::Substitution;

pub fn find_unifier(graph: &mut TermGraph, pair: &TermPair) -> UnificationResult {
    debug!(
        "robinson: unifying {} with {}",
        graph.display(pair.left),
        graph.display(pair.right)
    );
    let mut sigma = Substitution::identity();
    if unify(graph, pair.left, pair.right, &mut sigma) {
        UnificationResult::Unifiable(sigma)
    } else {
        UnificationResult::NotUnifiable
    }
}

fn unify(
    graph: &mut TermGraph,
    term1: TermId,
    term2: TermId,
    sigma: &mut Substitution,
) -> bool {
    let t1 = sigma.apply(term1, graph);
    let t2 = sigma.apply(term2, graph);
    if graph.eq_terms(t1, t2) {
        return true;
    }
    match (graph.kind(t1), graph.kind(t2)) {
        (TermKind::Function, TermKind::Function) => {
            if graph.name(t1) != graph.name(t2)
                || graph.children(t1).len() != graph.children(t2).len()
            {
                return false;
            }
            let arity = graph.children(t1).len();
            for i in 0..arity {
                let c1 = graph.children(t1)[i];
                let c2 = graph.children(t2)[i];
                if !unify(graph, c1, c2, sigma) {
                    return false;
                }
            }
            true
        }
        // equal names were already handled by the equality check above
        (TermKind::Constant, TermKind::Constant) => false,
        (TermKind::Variable, _) => bind(graph, t1, t2, sigma),
        (_, TermKind::Variable) => bind(graph, t2, t1, sigma),
        _ => false,
    }
}

/// Bind a variable, failing on an occurs-check violation
fn bind(
    graph: &mut TermGraph,
    variable: TermId,
    term: TermId,
    sigma: &mut Substitution,
) -> bool {
    if graph.contains(term, variable) {
        trace!(
            "robinson: occurs check failed, {} in {}",
            graph.display(variable),
            graph.display(term)
        );
        return false;
    }
    let name = graph.name(variable).to_owned();
    *sigma = sigma.compose_binding(&name, term, graph);
    true
}
