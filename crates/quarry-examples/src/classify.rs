use quarry_ast::{ChildRole, NodeId, NodeKind, SourceTree};

/// Enclosing declarations recorded by the ancestor walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnclosingScopes {
    pub method: Option<NodeId>,
    pub ty: Option<NodeId>,
}

/// A selection normalized for query building.
///
/// Built fresh per selection cycle and discarded at its end; nothing in
/// here outlives the tree it points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionContext {
    /// The simple name the user actually selected.
    pub simple_name: NodeId,
    /// `simple_name`, or its parent construct when the name only stands
    /// for that construct.
    pub selected: NodeId,
    /// Parent of `selected`; positional dispatch pivots on it.
    pub parent: Option<NodeId>,
    pub scopes: EnclosingScopes,
}

/// Normalizes a raw editor selection for query building.
///
/// Returns `None` when the selection carries no node, the node is not a
/// simple name, or neither an enclosing method nor an enclosing type
/// exists around it.
pub fn classify(tree: &SourceTree, raw: Option<NodeId>) -> Option<SelectionContext> {
    let simple_name = raw?;
    if tree.kind(simple_name) != NodeKind::SimpleName {
        return None;
    }
    let selected = if stands_for_parent(tree, simple_name) {
        tree.parent(simple_name)?
    } else {
        simple_name
    };
    let scopes = enclosing_scopes(tree, simple_name);
    if scopes.method.is_none() && scopes.ty.is_none() {
        return None;
    }
    Some(SelectionContext {
        simple_name,
        selected,
        parent: tree.parent(selected),
        scopes,
    })
}

/// True when the name is only the handle of a larger construct: a
/// declaration's name, the name of a simple type reference, the type
/// name of a marker or single-member annotation, or a method-invocation
/// name. Names inside normal annotations keep the raw selection.
fn stands_for_parent(tree: &SourceTree, name: NodeId) -> bool {
    let Some(parent) = tree.parent(name) else {
        return false;
    };
    match tree.role(name) {
        ChildRole::DeclarationName => true,
        ChildRole::TypeName => tree.kind(parent) == NodeKind::SimpleType,
        ChildRole::AnnotationTypeName => matches!(
            tree.kind(parent),
            NodeKind::MarkerAnnotation | NodeKind::SingleMemberAnnotation
        ),
        ChildRole::InvocationName => tree.kind(parent) == NodeKind::MethodInvocation,
        _ => false,
    }
}

/// Walks ancestors from the simple name upward. Every method declaration
/// overwrites the recorded method; the first type declaration is recorded
/// and stops the walk.
fn enclosing_scopes(tree: &SourceTree, from: NodeId) -> EnclosingScopes {
    let mut scopes = EnclosingScopes::default();
    for node in tree.ancestors(from) {
        match tree.kind(node) {
            NodeKind::MethodDeclaration => scopes.method = Some(node),
            NodeKind::TypeDeclaration => {
                scopes.ty = Some(node);
                break;
            }
            _ => {}
        }
    }
    scopes
}
