//! Term traversal orders
//!
//! Both iterators walk shared DAGs by occurrence: a node referenced from two
//! places is yielded twice. Deduplication, where needed, is the consumer's
//! concern (the Paterson-Wegman finished set, for instance).

use std::collections::VecDeque;

use super::graph::{TermGraph, TermId, TermKind};

/// Pre-order depth-first traversal with an explicit stack.
///
/// No recursion is involved, so traversal depth is not bounded by the call
/// stack.
pub struct Preorder<'g> {
    graph: &'g TermGraph,
    stack: Vec<TermId>,
}

impl<'g> Preorder<'g> {
    pub(crate) fn new(graph: &'g TermGraph, root: TermId) -> Self {
        Preorder {
            graph,
            stack: vec![root],
        }
    }
}

impl Iterator for Preorder<'_> {
    type Item = TermId;

    fn next(&mut self) -> Option<TermId> {
        let id = self.stack.pop()?;
        for &child in self.graph.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

/// Breadth-first traversal that defers variables until every function and
/// constant node has been yielded.
pub struct FunctionFirst<'g> {
    graph: &'g TermGraph,
    queue: VecDeque<TermId>,
    deferred_vars: VecDeque<TermId>,
}

impl<'g> FunctionFirst<'g> {
    pub(crate) fn new<I>(graph: &'g TermGraph, roots: I) -> Self
    where
        I: IntoIterator<Item = TermId>,
    {
        FunctionFirst {
            graph,
            queue: roots.into_iter().collect(),
            deferred_vars: VecDeque::new(),
        }
    }
}

impl Iterator for FunctionFirst<'_> {
    type Item = TermId;

    fn next(&mut self) -> Option<TermId> {
        while let Some(id) = self.queue.pop_front() {
            if self.graph.kind(id) == TermKind::Variable {
                self.deferred_vars.push_back(id);
                continue;
            }
            self.queue.extend(self.graph.children(id).iter().copied());
            return Some(id);
        }
        self.deferred_vars.pop_front()
    }
}
