use std::sync::Arc;

use quarry_index::Document;

use crate::resolve::MethodSnippet;

/// Placeholder text shown when the render queue rejects a request.
pub const THROTTLED_NOTICE: &str =
    "Too many rendering requests at once. Select this item again to refresh.";

/// Resolved content for one result row.
#[derive(Debug, Clone, PartialEq)]
pub enum ExampleRow {
    /// The snippet resolved; `highlight` is the substring the view should
    /// emphasize inside it.
    Snippet {
        snippet: MethodSnippet,
        highlight: String,
        doc: Arc<Document>,
    },
    /// The document's method no longer exists in the workspace.
    NotFound { doc: Arc<Document> },
    /// Resolution failed; `detail` is shown verbatim.
    Failed { detail: String },
    /// Dropped by the render queue; shows [`THROTTLED_NOTICE`].
    Throttled,
}

/// The result list widget, seen from the resolution pipeline.
///
/// Implementations live on the UI side; `replace` is only called from the
/// UI executor, after a disposal check.
pub trait ExampleList: Send + Sync {
    fn is_disposed(&self) -> bool;

    fn replace(&self, row: usize, content: ExampleRow);
}

/// Marshals closures onto the UI thread.
pub trait UiExecutor: Send + Sync {
    fn post(&self, job: Box<dyn FnOnce() + Send>);
}
