//! Paterson-Wegman near-linear unification
//!
//! Works directly on the shared term DAG of the pair without copying or
//! rewriting it. All working state is call-scoped: a pointer table mapping
//! nodes to the representative of their equivalence class, an undirected
//! link table of node pairs that must agree, the set of nodes already
//! confirmed consistent, and the triangular binding list. Nodes are visited
//! in function-first order; parents of a node are finished before the node
//! itself, so every class is completed exactly once.
//!
//! The occurs check is not run per binding. Re-entering an unfinished class
//! through a parent chain is detected via the pointer table, and any cycle
//! that survives traversal is caught by the final triangular resolution
//! pass, which is a single walk over the collected bindings.
//!
//! The near-linear bound assumes the input pair shares repeated substructure
//! as one DAG node (see [`TermPair::parse`]); on an unshared tree expansion
//! the advantage degrades. Parent back-references tie every node reachable
//! upward from the pair into the problem, so the pair must not share nodes
//! with unrelated terms in the same graph.

use log::{debug, trace};
use std::collections::{HashMap, HashSet};

use crate::syntax::{TermGraph, TermId, TermKind, TermPair};

use super::algorithm::UnificationResult;
use super::triangular::TriangularForm;

pub fn find_unifier(graph: &mut TermGraph, pair: &TermPair) -> UnificationResult {
    debug!(
        "paterson-wegman: unifying {} with {}",
        graph.display(pair.left),
        graph.display(pair.right)
    );
    let mut state = State::new();
    state.create_link(pair.left, pair.right);

    let order: Vec<TermId> = graph.function_first([pair.left, pair.right]).collect();
    for term in order {
        state.finish(graph, term);
        if !state.unifiable {
            return UnificationResult::NotUnifiable;
        }
    }

    match state.bindings.solve(graph) {
        Ok(sigma) => UnificationResult::Unifiable(sigma),
        Err(_) => UnificationResult::NotUnifiable,
    }
}

/// Working state of one unification call
struct State {
    /// Representative pointer per node; a node pointing at itself is the
    /// root of a class currently being finished
    pointers: HashMap<TermId, TermId>,
    /// Nodes whose class has been fully processed
    finished: HashSet<TermId>,
    /// Undirected must-agree edges between nodes of the two terms
    links: HashMap<TermId, Vec<TermId>>,
    /// Unifier in triangular form, in discovery order
    bindings: TriangularForm,
    unifiable: bool,
}

impl State {
    fn new() -> Self {
        State {
            pointers: HashMap::new(),
            finished: HashSet::new(),
            links: HashMap::new(),
            bindings: TriangularForm::new(),
            unifiable: true,
        }
    }

    fn create_link(&mut self, term1: TermId, term2: TermId) {
        self.links.entry(term1).or_default().push(term2);
        self.links.entry(term2).or_default().push(term1);
    }

    /// Complete the equivalence class represented by `term`: every node
    /// linked into the class is either bound to `term` (variables) or has
    /// its children linked pairwise with `term`'s children (functions).
    fn finish(&mut self, graph: &TermGraph, term: TermId) {
        if !self.unifiable || self.finished.contains(&term) {
            return;
        }
        if self.pointers.contains_key(&term) {
            // reached an unfinished class again through a parent chain
            trace!("paterson-wegman: cycle at {}", graph.display(term));
            self.unifiable = false;
            return;
        }
        self.pointers.insert(term, term);

        let mut stack = vec![term];
        while let Some(current) = stack.pop() {
            if is_rigid(graph, current)
                && is_rigid(graph, term)
                && !same_symbol(graph, current, term)
            {
                trace!(
                    "paterson-wegman: symbol clash {} vs {}",
                    graph.display(current),
                    graph.display(term)
                );
                self.unifiable = false;
                return;
            }
            // parents must be finished before their children are bound
            for &parent in graph.parents(current) {
                self.finish(graph, parent);
                if !self.unifiable {
                    return;
                }
            }
            let linked = self.links.get(&current).cloned().unwrap_or_default();
            for link in linked {
                if self.finished.contains(&link) || graph.eq_terms(link, term) {
                    continue;
                }
                match self.pointers.get(&link) {
                    None => {
                        self.pointers.insert(link, term);
                        stack.push(link);
                    }
                    Some(&representative) => {
                        if !graph.eq_terms(representative, term) {
                            self.unifiable = false;
                            return;
                        }
                    }
                }
            }
            if current != term {
                match graph.kind(current) {
                    TermKind::Variable => {
                        trace!(
                            "paterson-wegman: binding {} -> {}",
                            graph.name(current),
                            graph.display(term)
                        );
                        self.bindings.bind(graph.name(current), term);
                    }
                    _ => {
                        // same arity, guaranteed by the symbol check above
                        let arity = graph.children(current).len();
                        for i in 0..arity {
                            self.create_link(
                                graph.children(current)[i],
                                graph.children(term)[i],
                            );
                        }
                    }
                }
                self.finished.insert(current);
            }
        }
        self.finished.insert(term);
    }
}

/// Functions and constants are rigid; only variables can be bound
fn is_rigid(graph: &TermGraph, term: TermId) -> bool {
    graph.kind(term) != TermKind::Variable
}

/// Same kind, same name, same arity
fn same_symbol(graph: &TermGraph, term1: TermId, term2: TermId) -> bool {
    graph.kind(term1) == graph.kind(term2)
        && graph.name(term1) == graph.name(term2)
        && graph.children(term1).len() == graph.children(term2).len()
}
