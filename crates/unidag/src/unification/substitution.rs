//! Solved-form substitutions
//!
//! A [`Substitution`] maps variable names to terms. Variables are identified
//! by name because structural equality of terms is name-based; two
//! structurally equal variable nodes denote the same variable.
//!
//! Substitutions produced by the unification strategies are in solved form:
//! no bound term mentions a variable of the domain, so applying the
//! substitution twice is the same as applying it once.
//!
//! Composition convention, held consistently across this module and the
//! triangular-form resolver: `a.compose(&b, g)` builds the substitution that
//! applies `b` first and `a` second.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::syntax::{TermGraph, TermId, TermKind};

use super::triangular::{CycleError, TriangularForm};

/// A mapping from variables to terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    map: IndexMap<String, TermId>,
}

impl Substitution {
    /// The identity substitution: empty domain, applying it is a no-op
    pub fn identity() -> Self {
        Substitution {
            map: IndexMap::new(),
        }
    }

    /// Substitution with a single binding
    pub fn of(variable: &str, term: TermId) -> Self {
        let mut map = IndexMap::new();
        map.insert(variable.to_string(), term);
        Substitution { map }
    }

    /// Substitution with the given bindings
    pub fn of_map(map: IndexMap<String, TermId>) -> Self {
        Substitution { map }
    }

    /// Resolve a triangular binding set into solved form.
    ///
    /// Fails if the bindings are cyclic.
    pub fn from_triangular(
        form: &TriangularForm,
        graph: &mut TermGraph,
    ) -> Result<Self, CycleError> {
        form.solve(graph)
    }

    /// The bound variable names, in insertion order
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Iterate over (variable, bound term) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, TermId)> + '_ {
        self.map.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// The term bound to `variable`, if any
    pub fn get(&self, variable: &str) -> Option<TermId> {
        self.map.get(variable).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Compose with another substitution: the result applies `other` first,
    /// then `self`.
    ///
    /// For every variable in `other`'s domain the result binds it to `self`
    /// applied to `other`'s binding; variables bound only by `self` keep
    /// their binding. Bindings that resolve to the variable itself are
    /// dropped from the domain.
    pub fn compose(&self, other: &Substitution, graph: &mut TermGraph) -> Substitution {
        let mut map = IndexMap::new();
        for (name, &term) in &other.map {
            let applied = self.apply(term, graph);
            let is_identity =
                graph.kind(applied) == TermKind::Variable && graph.name(applied) == name;
            if !is_identity {
                map.insert(name.clone(), applied);
            }
        }
        for (name, &term) in &self.map {
            if !other.map.contains_key(name) {
                map.insert(name.clone(), term);
            }
        }
        Substitution { map }
    }

    /// Extend by one binding, propagating it through all existing bound
    /// terms (occurrences of `variable` already in the range are replaced by
    /// `term`).
    pub fn compose_binding(
        &self,
        variable: &str,
        term: TermId,
        graph: &mut TermGraph,
    ) -> Substitution {
        Substitution::of(variable, term).compose(self, graph)
    }

    /// Apply the substitution, building a new term.
    ///
    /// Copies go through a shared memo, so a subterm occurring several times
    /// in the input is rewritten once and stays shared in the result.
    /// Subterms without domain variables are reused as-is, not duplicated.
    pub fn apply(&self, term: TermId, graph: &mut TermGraph) -> TermId {
        let mut memo = HashMap::new();
        self.apply_memo(term, graph, &mut memo)
    }

    fn apply_memo(
        &self,
        term: TermId,
        graph: &mut TermGraph,
        memo: &mut HashMap<TermId, TermId>,
    ) -> TermId {
        if let Some(&done) = memo.get(&term) {
            return done;
        }
        let result = match graph.kind(term) {
            TermKind::Variable => self.get(graph.name(term)).unwrap_or(term),
            TermKind::Constant => term,
            TermKind::Function => {
                let children = graph.children(term).to_vec();
                let rewritten: Vec<TermId> = children
                    .iter()
                    .map(|&c| self.apply_memo(c, graph, memo))
                    .collect();
                if rewritten == children {
                    term
                } else {
                    let name = graph.name(term).to_owned();
                    graph.function(&name, rewritten)
                }
            }
        };
        memo.insert(term, result);
        result
    }

    /// Apply the substitution destructively, redirecting every bound
    /// variable node to its binding.
    ///
    /// All parents of the rewritten variables observe the change, including
    /// terms outside `term` that share those nodes. The caller must have
    /// exclusive access to the graph and must intend the mutation to be
    /// visible through every holder of the shared nodes; otherwise use
    /// [`Substitution::apply`] on a fresh deep copy.
    pub fn apply_in_place(&self, term: TermId, graph: &mut TermGraph) -> TermId {
        let bound_vars: Vec<TermId> = graph
            .preorder(term)
            .filter(|&id| {
                graph.kind(id) == TermKind::Variable && self.map.contains_key(graph.name(id))
            })
            .collect();
        let mut root = term;
        for var in bound_vars {
            let binding = self.map[graph.name(var)];
            if var == root {
                root = binding;
            }
            graph.redirect(var, binding);
        }
        root
    }

    /// Display adapter rendering `{X -> t, ...}`
    pub fn display<'a>(&'a self, graph: &'a TermGraph) -> SubstitutionDisplay<'a> {
        SubstitutionDisplay {
            substitution: self,
            graph,
        }
    }
}

/// Borrowed view rendering a substitution's bindings
pub struct SubstitutionDisplay<'a> {
    substitution: &'a Substitution,
    graph: &'a TermGraph,
}

impl fmt::Display for SubstitutionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, term)) in self.substitution.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", name, self.graph.display(term))?;
        }
        write!(f, "}}")
    }
}
