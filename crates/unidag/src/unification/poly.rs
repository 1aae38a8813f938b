//! Polynomial-time Robinson variant with deferred substitution
//!
//! The case analysis is the same as the naive algorithm, but discovered
//! bindings go into a triangular binding set instead of being applied to the
//! remaining structure. The bound variable node is isolated in the graph by
//! repointing its parents to the bound term, so later comparisons see it as
//! already substituted without any copying. The triangular set is resolved
//! to solved form once at the end; a cycle found there is an occurs-check
//! failure.
//!
//! Works on a sharing-preserving copy of the pair, leaving the caller's
//! terms intact.

use log::debug;

use crate::syntax::{TermGraph, TermId, TermKind, TermPair};

use super::algorithm::UnificationResult;
use super::triangular::TriangularForm;

pub fn find_unifier(graph: &mut TermGraph, pair: &TermPair) -> UnificationResult {
    debug!(
        "robinson-poly: unifying {} with {}",
        graph.display(pair.left),
        graph.display(pair.right)
    );
    let working = TermPair::copy_of(pair, graph);
    let mut bindings = TriangularForm::new();
    if !unify(graph, working.left, working.right, &mut bindings) {
        return UnificationResult::NotUnifiable;
    }
    match bindings.solve(graph) {
        Ok(sigma) => UnificationResult::Unifiable(sigma),
        Err(_) => UnificationResult::NotUnifiable,
    }
}

fn unify(graph: &mut TermGraph, term1: TermId, term2: TermId, bindings: &mut TriangularForm) -> bool {
    if graph.eq_terms(term1, term2) {
        return true;
    }
    match (graph.kind(term1), graph.kind(term2)) {
        (TermKind::Function, TermKind::Function) => {
            if graph.name(term1) != graph.name(term2)
                || graph.children(term1).len() != graph.children(term2).len()
            {
                return false;
            }
            let arity = graph.children(term1).len();
            for i in 0..arity {
                // re-read the slots: earlier redirects may have rewritten them
                let c1 = graph.children(term1)[i];
                let c2 = graph.children(term2)[i];
                if !unify(graph, c1, c2, bindings) {
                    return false;
                }
            }
            true
        }
        (TermKind::Constant, TermKind::Constant) => false,
        (TermKind::Variable, _) => {
            // a variable that already carries a binding is compared through
            // its bound term
            if let Some(bound) = bindings.get(graph.name(term1)) {
                return unify(graph, bound, term2, bindings);
            }
            if graph.contains(term2, term1) {
                return false;
            }
            let name = graph.name(term1).to_owned();
            bindings.bind(&name, term2);
            graph.redirect(term1, term2);
            true
        }
        (_, TermKind::Variable) => unify(graph, term2, term1, bindings),
        _ => false,
    }
}
