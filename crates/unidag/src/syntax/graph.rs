//! Terms as nodes of a shared directed acyclic graph
//!
//! All terms of one unification problem live in a single [`TermGraph`] arena
//! and are addressed by [`TermId`]. Each node stores its child ids and a list
//! of parent back-references, so repeated substructure is represented once
//! and can be rewritten in place through every parent at the same time.
//!
//! Structural equality and hashing are defined by kind and name (plus
//! recursively equal children for function terms), independent of node
//! identity: two structurally equal terms may or may not be the same shared
//! node.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::traversal::{FunctionFirst, Preorder};

/// Index of a term node inside a [`TermGraph`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermId(pub(crate) u32);

impl TermId {
    /// Get the raw index value (for debugging/serialization)
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// The variant of a term node
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    Variable,
    Constant,
    Function,
}

/// A single term node: kind, symbol name, ordered children and parent
/// back-references.
///
/// Invariant: `parents` is exactly the multiset of nodes currently holding
/// this node as a direct child. A parent appears once per child slot, so
/// `f(X,X)` contributes `f` twice to the parents of `X`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TermNode {
    kind: TermKind,
    name: String,
    children: Vec<TermId>,
    parents: Vec<TermId>,
}

/// Arena of term nodes forming one or more shared term DAGs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermGraph {
    nodes: Vec<TermNode>,
}

impl TermGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        TermGraph { nodes: Vec::new() }
    }

    fn push(&mut self, kind: TermKind, name: &str, children: Vec<TermId>) -> TermId {
        let id = TermId(self.nodes.len() as u32);
        self.nodes.push(TermNode {
            kind,
            name: name.to_string(),
            children: Vec::new(),
            parents: Vec::new(),
        });
        for &child in &children {
            self.add_parent(child, id);
        }
        self.nodes[id.0 as usize].children = children;
        id
    }

    fn node(&self, id: TermId) -> &TermNode {
        &self.nodes[id.0 as usize]
    }

    /// Create a variable node
    pub fn variable(&mut self, name: &str) -> TermId {
        self.push(TermKind::Variable, name, Vec::new())
    }

    /// Create a constant node
    pub fn constant(&mut self, name: &str) -> TermId {
        self.push(TermKind::Constant, name, Vec::new())
    }

    /// Create a function node holding the given children.
    ///
    /// Parent back-references of the children are updated. A zero-arity
    /// function is permitted and is distinct from a constant of the same
    /// name.
    pub fn function(&mut self, name: &str, children: Vec<TermId>) -> TermId {
        self.push(TermKind::Function, name, children)
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: TermId) -> TermKind {
        self.node(id).kind
    }

    pub fn name(&self, id: TermId) -> &str {
        &self.node(id).name
    }

    pub fn children(&self, id: TermId) -> &[TermId] {
        &self.node(id).children
    }

    pub fn parents(&self, id: TermId) -> &[TermId] {
        &self.node(id).parents
    }

    /// True for variables and constants always, for functions iff they have
    /// no children
    pub fn is_leaf(&self, id: TermId) -> bool {
        match self.node(id).kind {
            TermKind::Variable | TermKind::Constant => true,
            TermKind::Function => self.node(id).children.is_empty(),
        }
    }

    /// Structural equality: kind and name match, and children are pairwise
    /// structurally equal. Shared nodes compare equal to themselves without
    /// descending.
    pub fn eq_terms(&self, a: TermId, b: TermId) -> bool {
        if a == b {
            return true;
        }
        let (na, nb) = (self.node(a), self.node(b));
        if na.kind != nb.kind || na.name != nb.name || na.children.len() != nb.children.len() {
            return false;
        }
        na.children
            .iter()
            .zip(nb.children.iter())
            .all(|(&ca, &cb)| self.eq_terms(ca, cb))
    }

    /// Structural containment: true if `needle` is structurally equal to
    /// `haystack` or to any of its descendants. This is the occurs-check
    /// primitive.
    ///
    /// Each distinct node is tested once, so the cost is bounded by the
    /// number of DAG nodes under `haystack` rather than the number of
    /// occurrence paths.
    pub fn contains(&self, haystack: TermId, needle: TermId) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![haystack];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if self.eq_terms(id, needle) {
                return true;
            }
            stack.extend(self.children(id).iter().copied());
        }
        false
    }

    /// Deep copy of the term rooted at `id`.
    ///
    /// `memo` maps already-copied source nodes to their copies; a node found
    /// in the memo is returned as-is, which preserves DAG sharing across the
    /// copy and bounds the cost by the number of distinct nodes rather than
    /// the number of occurrences.
    pub fn deep_copy(&mut self, id: TermId, memo: &mut HashMap<TermId, TermId>) -> TermId {
        if let Some(&copy) = memo.get(&id) {
            return copy;
        }
        let copy = match self.kind(id) {
            TermKind::Variable => {
                let name = self.name(id).to_owned();
                self.variable(&name)
            }
            TermKind::Constant => {
                let name = self.name(id).to_owned();
                self.constant(&name)
            }
            TermKind::Function => {
                let children = self.children(id).to_vec();
                let copied = children.iter().map(|&c| self.deep_copy(c, memo)).collect();
                let name = self.name(id).to_owned();
                self.function(&name, copied)
            }
        };
        memo.insert(id, copy);
        copy
    }

    /// Record `parent` as holding `id` as a direct child
    pub fn add_parent(&mut self, id: TermId, parent: TermId) {
        self.nodes[id.0 as usize].parents.push(parent);
    }

    /// Detach `id` from all of its parents' back-reference lists.
    ///
    /// The child slots of the parents are left untouched; callers pair this
    /// with [`TermGraph::replace_child`] or use [`TermGraph::redirect`].
    pub fn remove_parents(&mut self, id: TermId) {
        self.nodes[id.0 as usize].parents.clear();
    }

    /// Destructively repoint every `old` child slot of `parent` to `new`,
    /// keeping the parent back-references of both nodes consistent.
    pub fn replace_child(&mut self, parent: TermId, old: TermId, new: TermId) {
        if old == new {
            return;
        }
        let mut replaced = 0;
        let n = self.nodes[parent.0 as usize].children.len();
        for i in 0..n {
            if self.nodes[parent.0 as usize].children[i] == old {
                self.nodes[parent.0 as usize].children[i] = new;
                replaced += 1;
            }
        }
        let old_parents = &mut self.nodes[old.0 as usize].parents;
        for _ in 0..replaced {
            if let Some(pos) = old_parents.iter().position(|&p| p == parent) {
                old_parents.swap_remove(pos);
            }
        }
        for _ in 0..replaced {
            self.nodes[new.0 as usize].parents.push(parent);
        }
    }

    /// Repoint all parents of `old` to `new`, isolating `old`.
    ///
    /// Every term that held `old` as a child holds `new` afterwards; `old`
    /// keeps its children but no longer occurs anywhere. This is the
    /// in-place substitution step and is observable by every holder of the
    /// shared nodes.
    pub fn redirect(&mut self, old: TermId, new: TermId) {
        if old == new {
            return;
        }
        let parents = std::mem::take(&mut self.nodes[old.0 as usize].parents);
        for &parent in &parents {
            let n = self.nodes[parent.0 as usize].children.len();
            for i in 0..n {
                if self.nodes[parent.0 as usize].children[i] == old {
                    self.nodes[parent.0 as usize].children[i] = new;
                }
            }
        }
        self.nodes[new.0 as usize].parents.extend(parents);
    }

    /// Lazy pre-order traversal (node, then children left to right) using an
    /// explicit stack. Each call yields an independent traversal position;
    /// shared nodes are visited once per occurrence.
    pub fn preorder(&self, root: TermId) -> Preorder<'_> {
        Preorder::new(self, root)
    }

    /// Breadth-first traversal that yields function and constant nodes
    /// before any variable node (the Paterson-Wegman visit order).
    pub fn function_first<I>(&self, roots: I) -> FunctionFirst<'_>
    where
        I: IntoIterator<Item = TermId>,
    {
        FunctionFirst::new(self, roots)
    }

    /// Display adapter rendering the parseable text form of a term
    pub fn display(&self, id: TermId) -> TermDisplay<'_> {
        TermDisplay { graph: self, id }
    }
}

/// Borrowed view rendering a term in its textual syntax
pub struct TermDisplay<'g> {
    graph: &'g TermGraph,
    id: TermId,
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.graph;
        match g.kind(self.id) {
            TermKind::Variable | TermKind::Constant => write!(f, "{}", g.name(self.id)),
            TermKind::Function => {
                write!(f, "{}(", g.name(self.id))?;
                for (i, &child) in g.children(self.id).iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", g.display(child))?;
                }
                write!(f, ")")
            }
        }
    }
}
