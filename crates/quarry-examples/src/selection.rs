use std::sync::Arc;

use quarry_ast::{NodeId, SourceTree};

/// Workspace-level identity of whatever the editor reports as selected.
///
/// Field and local-variable selections carry their declared type's
/// signature; the workspace resolves it to an index identifier during
/// query building. The remaining kinds are fully described by the
/// selection's syntax tree context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedElement {
    Field { type_signature: String },
    LocalVariable { type_signature: String },
    Type,
    Method,
    Other,
}

/// One editor selection change, paired with the file's current tree.
#[derive(Debug, Clone)]
pub struct SelectionEvent {
    pub element: SelectedElement,
    pub tree: Arc<SourceTree>,
    /// The innermost node covering the selection, when the front end
    /// reported one.
    pub node: Option<NodeId>,
}
