use quarry_core::Span;

use crate::bindings::{MethodBinding, TypeBinding, VarBinding, VarId};
use crate::node::{ChildRole, NodeKind};
use crate::tree::{NodeData, NodeId, SourceTree};

/// Incremental constructor for [`SourceTree`].
///
/// The front end appends nodes top-down, attaches resolved bindings as
/// resolution completes, then seals the tree with [`TreeBuilder::finish`].
/// Children appear in [`SourceTree::children`] in insertion order, which
/// the builder's caller keeps equal to source order.
#[derive(Debug)]
pub struct TreeBuilder {
    source: String,
    nodes: Vec<NodeData>,
    vars: Vec<VarBinding>,
}

impl TreeBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        TreeBuilder {
            source: source.into(),
            nodes: Vec::new(),
            vars: Vec::new(),
        }
    }

    /// Creates the root node. Must be the first node added.
    pub fn root(&mut self, kind: NodeKind) -> NodeId {
        assert!(self.nodes.is_empty(), "root must be the first node");
        self.push(NodeData {
            kind,
            role: ChildRole::Root,
            parent: None,
            children: Vec::new(),
            span: Span::new(0, self.source.len() as u32),
            label: None,
            var: None,
            type_binding: None,
            method_binding: None,
        })
    }

    /// Appends a child of `parent` occupying the `role` slot.
    pub fn node(&mut self, parent: NodeId, kind: NodeKind, role: ChildRole) -> NodeId {
        assert!(parent.idx() < self.nodes.len(), "parent not in this tree");
        let id = self.push(NodeData {
            kind,
            role,
            parent: Some(parent),
            children: Vec::new(),
            span: Span::zero(),
            label: None,
            var: None,
            type_binding: None,
            method_binding: None,
        });
        self.nodes[parent.idx()].children.push(id);
        id
    }

    /// Shorthand for the most common leaf: a labeled simple name.
    pub fn name(&mut self, parent: NodeId, role: ChildRole, label: impl Into<String>) -> NodeId {
        let id = self.node(parent, NodeKind::SimpleName, role);
        self.nodes[id.idx()].label = Some(label.into());
        id
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.idx()].span = span;
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        self.nodes[id.idx()].label = Some(label.into());
    }

    /// Registers a variable and returns its id for later [`bind_var`] calls.
    ///
    /// [`bind_var`]: TreeBuilder::bind_var
    pub fn declare_var(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId(self.vars.len() as u32);
        self.vars.push(VarBinding { name: name.into() });
        id
    }

    pub fn bind_var(&mut self, id: NodeId, var: VarId) {
        assert!(var.idx() < self.vars.len(), "variable not declared");
        self.nodes[id.idx()].var = Some(var);
    }

    pub fn bind_type(&mut self, id: NodeId, binding: TypeBinding) {
        self.nodes[id.idx()].type_binding = Some(binding);
    }

    pub fn bind_method(&mut self, id: NodeId, binding: MethodBinding) {
        self.nodes[id.idx()].method_binding = Some(binding);
    }

    pub fn finish(self) -> SourceTree {
        SourceTree {
            source: self.source,
            nodes: self.nodes,
            vars: self.vars,
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(data);
        id
    }
}
