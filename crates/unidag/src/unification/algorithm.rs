//! Algorithm selection and the unification result type
//!
//! The set of algorithms is closed and known at build time, so selection is
//! an enum rather than a runtime registry. `Algorithm` values are stateless
//! descriptors: all working state lives inside one `find_unifier` call, so a
//! value can be shared and reused freely across threads and problems. The
//! term graph itself still requires exclusive access for the duration of a
//! call (the polynomial strategy extends it, and in-place substitution
//! application rewrites it).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::syntax::{TermGraph, TermPair};

use super::substitution::Substitution;
use super::{paterson_wegman, poly, robinson};

/// Outcome of a unification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnificationResult {
    /// The pair is unifiable; the contained substitution is the most general
    /// unifier in solved form
    Unifiable(Substitution),
    /// Symbol clash, arity mismatch or occurs-check violation
    NotUnifiable,
}

impl UnificationResult {
    pub fn is_unifiable(&self) -> bool {
        matches!(self, UnificationResult::Unifiable(_))
    }

    /// The unifier, if the pair was unifiable
    pub fn unifier(&self) -> Option<&Substitution> {
        match self {
            UnificationResult::Unifiable(sigma) => Some(sigma),
            UnificationResult::NotUnifiable => None,
        }
    }

    pub fn into_unifier(self) -> Option<Substitution> {
        match self {
            UnificationResult::Unifiable(sigma) => Some(sigma),
            UnificationResult::NotUnifiable => None,
        }
    }
}

/// A unification algorithm
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Naive recursive Robinson with eager substitution application;
    /// exponential worst case
    Robinson,
    /// Robinson with deferred triangular bindings; polynomial time
    PolynomialRobinson,
    /// Paterson-Wegman pointer-based unification; near-linear on shared DAGs
    PatersonWegman,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Robinson,
        Algorithm::PolynomialRobinson,
        Algorithm::PatersonWegman,
    ];

    /// The selection name, as accepted by [`Algorithm::from_str`]
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Robinson => "robinson",
            Algorithm::PolynomialRobinson => "robinson-poly",
            Algorithm::PatersonWegman => "paterson-wegman",
        }
    }

    /// Decide whether a substitution exists making both terms of the pair
    /// structurally identical, and return the most general one in solved
    /// form if so.
    pub fn find_unifier(self, graph: &mut TermGraph, pair: &TermPair) -> UnificationResult {
        match self {
            Algorithm::Robinson => robinson::find_unifier(graph, pair),
            Algorithm::PolynomialRobinson => poly::find_unifier(graph, pair),
            Algorithm::PatersonWegman => paterson_wegman::find_unifier(graph, pair),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
