//! Turns a search hit back into the method snippet it was indexed from.
//!
//! Documents only store a workspace handle, so every row the view wants
//! to show costs a workspace lookup plus a parse. That work runs on the
//! render pool; the functions here are synchronous and thread-safe.

use std::sync::Arc;

use once_cell::sync::Lazy;
use quarry_ast::{NodeId, SourceTree, TypeBinding};
use quarry_core::Span;
use quarry_index::{Document, Field};
use serde::{Deserialize, Serialize};

use crate::query::SearchCategory;
use crate::view::ExampleRow;

/// A workspace element addressed by its stable handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceElement {
    pub handle: String,
}

/// A method declaration in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodElement {
    pub handle: String,
    pub name: String,
}

/// Read access to the developer's workspace.
///
/// The examples pipeline never mutates the workspace; it resolves
/// handles recorded at index time against whatever state the workspace
/// has now, and tolerates every lookup failing.
pub trait WorkspaceModel: Send + Sync {
    /// Looks up any element by handle. `None` when the handle no longer
    /// resolves, e.g. after a rename.
    fn element(&self, handle: &str) -> Option<WorkspaceElement>;

    /// The innermost method declaration containing `element`, or the
    /// element itself when it is one.
    fn enclosing_method(&self, element: &WorkspaceElement) -> Option<MethodElement>;

    /// Parses the compilation unit declaring `method`. May block on IO;
    /// never call this on the UI thread.
    fn syntax_tree(&self, method: &MethodElement) -> Option<Arc<SourceTree>>;

    /// Finds `method`'s declaration node inside `tree`.
    fn declaration_node(&self, tree: &SourceTree, method: &MethodElement) -> Option<NodeId>;

    /// Resolves a type signature such as `Ljava/util/List;` or `[I`.
    fn type_from_signature(&self, signature: &str) -> Option<TypeBinding>;
}

/// A method body extracted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSnippet {
    pub name: String,
    pub text: String,
    /// Location of the declaration within its compilation unit.
    pub span: Span,
}

static NOT_FOUND: Lazy<MethodSnippet> = Lazy::new(|| MethodSnippet {
    name: "not_found".to_owned(),
    text: String::new(),
    span: Span::zero(),
});

/// The shared placeholder views render for [`ExampleRow::NotFound`].
pub fn not_found_snippet() -> &'static MethodSnippet {
    &NOT_FOUND
}

/// Everything a pool job needs to resolve one row.
#[derive(Debug, Clone)]
pub struct ResolveTask {
    /// Rank of the hit in the current result, used to address the row.
    pub row: usize,
    pub doc: Arc<Document>,
    pub category: SearchCategory,
    /// Highlight used when the document carries no variable name.
    pub fallback_highlight: String,
}

/// Resolves one hit document to displayable row content.
///
/// Failures are data, not errors: a stale handle yields `Failed`, a
/// vanished method yields `NotFound`, and repeating the call for the
/// same task yields the same row.
pub fn resolve(workspace: &dyn WorkspaceModel, task: &ResolveTask) -> ExampleRow {
    let handle = task.doc.get(Field::ElementHandle).unwrap_or("");
    let Some(element) = workspace.element(handle) else {
        return ExampleRow::Failed {
            detail: format!("could not find handle {handle}"),
        };
    };
    let Some(method) = workspace.enclosing_method(&element) else {
        return ExampleRow::NotFound {
            doc: Arc::clone(&task.doc),
        };
    };
    let Some(tree) = workspace.syntax_tree(&method) else {
        return ExampleRow::NotFound {
            doc: Arc::clone(&task.doc),
        };
    };
    let Some(decl) = workspace.declaration_node(&tree, &method) else {
        return ExampleRow::NotFound {
            doc: Arc::clone(&task.doc),
        };
    };

    let highlight = match task.category {
        SearchCategory::VariableUsage => {
            task.doc.get(Field::VariableName).unwrap_or("").to_owned()
        }
        _ => task.fallback_highlight.clone(),
    };
    let name = tree
        .declared_name(decl)
        .and_then(|n| tree.label(n))
        .map(str::to_owned)
        .unwrap_or_else(|| method.name.clone());

    ExampleRow::Snippet {
        snippet: MethodSnippet {
            name,
            text: tree.text(decl).to_owned(),
            span: tree.span(decl),
        },
        highlight,
        doc: Arc::clone(&task.doc),
    }
}
