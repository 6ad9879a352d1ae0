use std::fmt;

use quarry_core::Span;
use serde::{Deserialize, Serialize};

use crate::bindings::{MethodBinding, TypeBinding, VarBinding, VarId};
use crate::node::{ChildRole, NodeKind};

/// Index of a node in its [`SourceTree`].
///
/// Ids are dense and only meaningful for the tree that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) role: ChildRole,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) span: Span,
    pub(crate) label: Option<String>,
    pub(crate) var: Option<VarId>,
    pub(crate) type_binding: Option<TypeBinding>,
    pub(crate) method_binding: Option<MethodBinding>,
}

/// An immutable parsed tree with resolved bindings.
///
/// Produced by [`crate::TreeBuilder`]; consumers only read. All node
/// accessors panic on an id from a different tree, the same contract as
/// indexing a slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTree {
    pub(crate) source: String,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) vars: Vec<VarBinding>,
}

impl SourceTree {
    /// The root node. Every non-empty tree has exactly one.
    pub fn root(&self) -> NodeId {
        assert!(!self.nodes.is_empty(), "empty tree has no root");
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.data(id).kind
    }

    pub fn role(&self, id: NodeId) -> ChildRole {
        self.data(id).role
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.data(id).span
    }

    /// The label recorded for a name node, if any.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.data(id).label.as_deref()
    }

    /// Source text covered by the node's span.
    pub fn text(&self, id: NodeId) -> &str {
        self.data(id).span.slice(&self.source)
    }

    /// The variable this name node refers to, if resolution succeeded.
    pub fn var_ref(&self, id: NodeId) -> Option<VarId> {
        self.data(id).var
    }

    pub fn var_name(&self, var: VarId) -> &str {
        &self.vars[var.idx()].name
    }

    pub fn type_binding(&self, id: NodeId) -> Option<&TypeBinding> {
        self.data(id).type_binding.as_ref()
    }

    pub fn method_binding(&self, id: NodeId) -> Option<&MethodBinding> {
        self.data(id).method_binding.as_ref()
    }

    /// Walks from `id` to the root, yielding `id` itself first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.data(n).parent)
    }

    /// Preorder traversal of the subtree rooted at `id`, including `id`.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            let kids = &self.data(next).children;
            stack.extend(kids.iter().rev().copied());
            Some(next)
        })
    }

    /// All name nodes in the tree that refer to the same variable as `id`,
    /// in source order, including `id` itself.
    ///
    /// Uses binding identity when `id` resolved; otherwise falls back to
    /// matching name text among unresolved simple names, which keeps the
    /// occurrence walk useful on trees with incomplete resolution.
    pub fn linked_occurrences(&self, id: NodeId) -> Vec<NodeId> {
        match self.data(id).var {
            Some(var) => (0..self.nodes.len() as u32)
                .map(NodeId)
                .filter(|&n| self.data(n).var == Some(var))
                .collect(),
            None => {
                let Some(label) = self.data(id).label.as_deref() else {
                    return vec![id];
                };
                (0..self.nodes.len() as u32)
                    .map(NodeId)
                    .filter(|&n| {
                        let data = self.data(n);
                        data.kind == NodeKind::SimpleName
                            && data.var.is_none()
                            && data.label.as_deref() == Some(label)
                    })
                    .collect()
            }
        }
    }

    /// The name node occupying the declaration-name slot of `id`.
    pub fn declared_name(&self, id: NodeId) -> Option<NodeId> {
        self.data(id)
            .children
            .iter()
            .copied()
            .find(|&c| self.data(c).role == ChildRole::DeclarationName)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.idx()]
    }
}
