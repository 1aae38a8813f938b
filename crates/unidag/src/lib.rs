//! unidag: first-order term unification over shared term DAGs
//!
//! Terms live in an arena-backed [`TermGraph`] with parent back-references,
//! so repeated subterms can be stored once and observed from every context
//! that uses them. Three unification strategies are provided behind the
//! [`Algorithm`] selector: the naive exponential Robinson baseline, a
//! polynomial Robinson variant with deferred triangular bindings, and the
//! near-linear Paterson-Wegman algorithm.
//!
//! ```
//! use unidag::{Algorithm, TermGraph, TermPair};
//!
//! let mut graph = TermGraph::new();
//! let pair = TermPair::parse("f(X,a)", "f(b,Y)", &mut graph)?;
//! let result = Algorithm::PatersonWegman.find_unifier(&mut graph, &pair);
//! let sigma = result.unifier().unwrap();
//! assert_eq!(graph.display(sigma.get("X").unwrap()).to_string(), "b");
//! assert_eq!(graph.display(sigma.get("Y").unwrap()).to_string(), "a");
//! # Ok::<(), unidag::Error>(())
//! ```

pub mod error;
pub mod parser;
pub mod syntax;
pub mod unification;

pub use error::{Error, Result};

// Re-export the term model
pub use syntax::{TermGraph, TermId, TermKind, TermPair};

// Re-export unification types
pub use unification::{
    Algorithm, CycleError, Substitution, TriangularForm, UnificationResult,
};
