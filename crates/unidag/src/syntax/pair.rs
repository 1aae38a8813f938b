//! Pairs of terms to be unified

use std::collections::HashMap;

use crate::error::Result;
use crate::parser;

use super::graph::{TermGraph, TermId};

/// An ordered pair of terms inside one [`TermGraph`].
///
/// Pairs built through [`TermPair::parse`] share structure between the two
/// sides: substructure that is textually identical in both inputs is one DAG
/// node. The Paterson-Wegman strategy's near-linear bound is only meaningful
/// on such shared input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TermPair {
    pub left: TermId,
    pub right: TermId,
}

impl TermPair {
    pub fn new(left: TermId, right: TermId) -> Self {
        TermPair { left, right }
    }

    /// Parse two term strings against a shared subterm table
    pub fn parse(input1: &str, input2: &str, graph: &mut TermGraph) -> Result<Self> {
        let (left, right) = parser::parse_term_pair(input1, input2, graph)?;
        Ok(TermPair { left, right })
    }

    /// Deep copy of both terms through one shared memo, preserving the
    /// sharing between the two sides.
    ///
    /// Strategies that rewrite the graph in place work on such a copy so the
    /// caller's terms stay intact.
    pub fn copy_of(pair: &TermPair, graph: &mut TermGraph) -> Self {
        let mut memo = HashMap::new();
        TermPair {
            left: graph.deep_copy(pair.left, &mut memo),
            right: graph.deep_copy(pair.right, &mut memo),
        }
    }
}
