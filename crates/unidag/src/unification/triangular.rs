//! Triangular binding sets and their resolution to solved form
//!
//! A triangular form is the intermediate representation accumulated by the
//! polynomial-time strategies: a variable's bound term may mention other
//! variables that are themselves keys. It is a distinct type from
//! [`Substitution`](super::Substitution) so an unresolved binding set cannot
//! be passed where the solved-form idempotence invariant is assumed.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::syntax::{TermGraph, TermId, TermKind};

use super::substitution::Substitution;

/// A chain of bindings closed back on itself, e.g. `{X -> f(Y), Y -> f(X)}`.
///
/// This generalizes the single-step occurs check to chains of bindings; a
/// cyclic set denotes an infinite term and has no solved form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cyclic binding chain through variable {0}")]
pub struct CycleError(pub String);

/// Variable bindings in triangular form, insertion-ordered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriangularForm {
    bindings: IndexMap<String, TermId>,
}

impl TriangularForm {
    pub fn new() -> Self {
        TriangularForm {
            bindings: IndexMap::new(),
        }
    }

    /// Record a binding. A later binding for the same variable replaces the
    /// earlier one.
    pub fn bind(&mut self, variable: &str, term: TermId) {
        self.bindings.insert(variable.to_string(), term);
    }

    pub fn get(&self, variable: &str) -> Option<TermId> {
        self.bindings.get(variable).copied()
    }

    pub fn is_bound(&self, variable: &str) -> bool {
        self.bindings.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Resolve the bindings into an idempotent solved-form substitution.
    ///
    /// Every variable reference that is itself a key is replaced by that
    /// key's recursively resolved bound term. Reaching a variable again while
    /// it is still being resolved is a cycle and fails the whole conversion.
    pub fn solve(&self, graph: &mut TermGraph) -> Result<Substitution, CycleError> {
        let mut solver = Solver {
            form: self,
            graph,
            ready: HashMap::new(),
            in_progress: HashSet::new(),
            rebuilt: HashMap::new(),
        };
        let mut domain = IndexMap::new();
        for name in self.bindings.keys() {
            let resolved = solver.resolve_variable(name)?;
            domain.insert(name.clone(), resolved);
        }
        Ok(Substitution::of_map(domain))
    }
}

/// Call-scoped resolution state
struct Solver<'a> {
    form: &'a TriangularForm,
    graph: &'a mut TermGraph,
    /// Fully resolved variables
    ready: HashMap<String, TermId>,
    /// Variables whose resolution is underway; re-entry is a cycle
    in_progress: HashSet<String>,
    /// Resolved replacement per visited function node
    rebuilt: HashMap<TermId, TermId>,
}

impl Solver<'_> {
    fn resolve_variable(&mut self, name: &str) -> Result<TermId, CycleError> {
        if let Some(&done) = self.ready.get(name) {
            return Ok(done);
        }
        if !self.in_progress.insert(name.to_string()) {
            return Err(CycleError(name.to_string()));
        }
        let bound = self.form.bindings[name];
        let resolved = self.descend(bound)?;
        self.in_progress.remove(name);
        self.ready.insert(name.to_string(), resolved);
        Ok(resolved)
    }

    fn descend(&mut self, term: TermId) -> Result<TermId, CycleError> {
        match self.graph.kind(term) {
            TermKind::Variable => {
                let name = self.graph.name(term).to_owned();
                if self.form.is_bound(&name) {
                    self.resolve_variable(&name)
                } else {
                    Ok(term)
                }
            }
            TermKind::Constant => Ok(term),
            TermKind::Function => {
                if let Some(&done) = self.rebuilt.get(&term) {
                    return Ok(done);
                }
                let children = self.graph.children(term).to_vec();
                let mut resolved = Vec::with_capacity(children.len());
                for &child in &children {
                    resolved.push(self.descend(child)?);
                }
                let result = if resolved == children {
                    term
                } else {
                    let name = self.graph.name(term).to_owned();
                    self.graph.function(&name, resolved)
                };
                self.rebuilt.insert(term, result);
                Ok(result)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_term;

    #[test]
    fn chained_bindings_resolve_to_solved_form() {
        // {X -> Y, Y -> a} resolves to {X -> a, Y -> a}
        let mut g = TermGraph::new();
        let y = g.variable("Y");
        let a = g.constant("a");
        let mut tri = TriangularForm::new();
        tri.bind("X", y);
        tri.bind("Y", a);

        let solved = tri.solve(&mut g).unwrap();
        assert_eq!(solved.get("X"), Some(a));
        assert_eq!(solved.get("Y"), Some(a));
    }

    #[test]
    fn bindings_through_functions_resolve() {
        // {X -> f(Y), Y -> g(Z), Z unbound}
        let mut g = TermGraph::new();
        let fy = parse_term("f(Y)", &mut g).unwrap();
        let gz = parse_term("g(Z)", &mut g).unwrap();
        let mut tri = TriangularForm::new();
        tri.bind("X", fy);
        tri.bind("Y", gz);

        let solved = tri.solve(&mut g).unwrap();
        assert_eq!(g.display(solved.get("X").unwrap()).to_string(), "f(g(Z))");
        assert_eq!(g.display(solved.get("Y").unwrap()).to_string(), "g(Z)");
    }

    #[test]
    fn solved_form_is_idempotent() {
        let mut g = TermGraph::new();
        let fy = parse_term("f(Y)", &mut g).unwrap();
        let a = g.constant("a");
        let mut tri = TriangularForm::new();
        tri.bind("X", fy);
        tri.bind("Y", a);

        let solved = tri.solve(&mut g).unwrap();
        let t = parse_term("h(X,Y,Z)", &mut g).unwrap();
        let once = solved.apply(t, &mut g);
        let twice = solved.apply(once, &mut g);
        assert!(g.eq_terms(once, twice));
        assert_eq!(g.display(once).to_string(), "h(f(a),a,Z)");
    }

    #[test]
    fn binding_cycle_is_rejected() {
        // {X -> f(Y), Y -> f(X)}
        let mut g = TermGraph::new();
        let fy = parse_term("f(Y)", &mut g).unwrap();
        let fx = parse_term("f(X)", &mut g).unwrap();
        let mut tri = TriangularForm::new();
        tri.bind("X", fy);
        tri.bind("Y", fx);

        assert!(tri.solve(&mut g).is_err());
    }

    #[test]
    fn direct_self_reference_is_rejected() {
        // {X -> f(X)}
        let mut g = TermGraph::new();
        let fx = parse_term("f(X)", &mut g).unwrap();
        let mut tri = TriangularForm::new();
        tri.bind("X", fx);

        let err = tri.solve(&mut g).unwrap_err();
        assert_eq!(err, CycleError("X".to_string()));
    }

    #[test]
    fn shared_subterms_resolve_once() {
        // {X -> f(g(Y),g(Y)), Y -> a} with g(Y) shared
        let mut g = TermGraph::new();
        let t = parse_term("f(g(Y),g(Y))", &mut g).unwrap();
        let a = g.constant("a");
        let mut tri = TriangularForm::new();
        tri.bind("X", t);
        tri.bind("Y", a);

        let solved = tri.solve(&mut g).unwrap();
        let bound = solved.get("X").unwrap();
        assert_eq!(g.display(bound).to_string(), "f(g(a),g(a))");
        let children = g.children(bound);
        assert_eq!(children[0], children[1]);
    }
}
