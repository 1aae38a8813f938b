//! Term model: shared term DAGs, traversal orders and term pairs

pub mod graph;
pub mod pair;
pub mod traversal;

pub use graph::{TermDisplay, TermGraph, TermId, TermKind};
pub use pair::TermPair;
pub use traversal::{FunctionFirst, Preorder};
