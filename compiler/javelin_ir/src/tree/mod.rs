//! Syntax tree arena.
//!
//! Nodes live in one flat `Vec` and reference their children by [`NodeId`].
//! An edited tree shares every untouched subtree with the baseline it was
//! derived from: the edit allocates new nodes only along the path to the
//! change, so "unchanged relative to the baseline" is simply a node that
//! came out of the parser and is still reachable.
//!
//! # Building
//!
//! Parser output is added with [`SyntaxTree::alloc_original`], edits with
//! [`SyntaxTree::alloc`]. Once the baseline tree is complete, call
//! [`SyntaxTree::set_baseline_root`]; this indexes parent links of the
//! baseline, which verbatim copying of sibling runs relies on.

mod build;
mod kinds;
pub mod ops;

#[cfg(test)]
mod tests;

use rustc_hash::FxHashMap;

use crate::{NodeId, Span};

pub use kinds::{ClassDecl, Literal, MethodDecl, NodeKind, VariableDecl};

/// Kind reported for ids that are not in the arena.
static MISSING: NodeKind = NodeKind::Empty;

/// One node of the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Byte range in the original text; `None` for generated nodes.
    pub span: Option<Span>,
    /// The node is part of the baseline tree and was not modified.
    pub unchanged: bool,
}

/// Arena of syntax nodes for one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    baseline_root: Option<NodeId>,
    /// Parent of every node reachable from the baseline root.
    baseline_parents: FxHashMap<NodeId, NodeId>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        SyntaxTree::default()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(node);
        NodeId::new(index)
    }

    /// Allocate a generated (edited) node.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.push(Node {
            kind,
            span: None,
            unchanged: false,
        })
    }

    /// Allocate a node parsed from the original text.
    pub fn alloc_original(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.push(Node {
            kind,
            span: Some(span),
            unchanged: true,
        })
    }

    /// Copy `id` into a new generated node and apply `edit` to the copy.
    ///
    /// The original node stays in the arena (and in the baseline tree).
    pub fn derive(&mut self, id: NodeId, edit: impl FnOnce(&mut NodeKind)) -> NodeId {
        let mut kind = self.kind(id).clone();
        edit(&mut kind);
        self.alloc(kind)
    }

    /// Record the baseline root and index its parent links.
    pub fn set_baseline_root(&mut self, root: NodeId) {
        self.baseline_root = Some(root);
        self.baseline_parents.clear();
        let mut stack = vec![root];
        while let Some(parent) = stack.pop() {
            let Some(node) = self.nodes.get(parent.index()) else {
                continue;
            };
            node.kind.for_each_child(|child| {
                self.baseline_parents.insert(child, parent);
                stack.push(child);
            });
        }
    }

    pub fn baseline_root(&self) -> Option<NodeId> {
        self.baseline_root
    }

    /// Parent of `id` in the baseline tree.
    pub fn baseline_parent(&self, id: NodeId) -> Option<NodeId> {
        self.baseline_parents.get(&id).copied()
    }

    /// Whether `run` appears, in order and without gaps, in the statement or
    /// member list of one parent of the baseline tree.
    pub fn is_contiguous_baseline_run(&self, run: &[NodeId]) -> bool {
        let Some(&first) = run.first() else {
            return false;
        };
        let Some(parent) = self.baseline_parent(first) else {
            return false;
        };
        let Some(list) = self.kind(parent).statement_list() else {
            return false;
        };
        let Some(pos) = list.iter().position(|&id| id == first) else {
            return false;
        };
        list.get(pos..pos + run.len()) == Some(run)
    }

    /// # Panics
    ///
    /// Panics if `id` is not in this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Look up a node, returning `None` for ids from another arena.
    #[inline]
    pub fn try_get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Kind of `id`; an id from another arena reads as an empty statement.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.try_get(id).map_or(&MISSING, |node| &node.kind)
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.try_get(id).and_then(|node| node.span)
    }

    #[inline]
    pub fn is_unchanged(&self, id: NodeId) -> bool {
        self.try_get(id).is_some_and(|node| node.unchanged)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of `id` in source order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.kind(id).children()
    }

    /// `id` and all its descendants, preorder.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }
}

/// Preorder iterator over a subtree. See [`SyntaxTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let first = self.stack.len();
        if let Some(node) = self.tree.try_get(id) {
            node.kind.for_each_child(|child| self.stack.push(child));
        }
        // Children were pushed in source order; pop them first-to-last.
        self.stack[first..].reverse();
        Some(id)
    }
}
