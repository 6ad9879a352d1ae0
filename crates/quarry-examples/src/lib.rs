//! Local code examples for the current editor selection.
//!
//! Given a selection event from the editor, this crate classifies the
//! selected syntax ([`classify`]), derives a boolean usage query from the
//! selection's syntactic context ([`build`]), runs it against the example
//! index, and resolves each hit back to a renderable method snippet on a
//! bounded worker pool. The UI list, the index backend, and the compiler
//! front end stay behind seams: [`ExampleList`] and [`UiExecutor`] for the
//! toolkit layer, [`quarry_index::CodeSearcher`] for the index, and
//! [`WorkspaceModel`] for symbol and tree lookup.
//!
//! The pipeline never blocks the UI thread: searches run in the selection
//! handler, row resolution on [`RenderPool`] workers, and every UI write
//! is marshaled through [`UiExecutor`] with a disposal check.

pub mod classify;
pub mod config;
pub mod executor;
pub mod presenter;
pub mod provider;
pub mod query;
pub mod resolve;
pub mod selection;
pub mod view;

pub use classify::{classify, EnclosingScopes, SelectionContext};
pub use config::ExamplesConfig;
pub use executor::{RenderPool, SubmitError, DEFAULT_QUEUE_CAPACITY};
pub use presenter::ExamplesPresenter;
pub use provider::{ExampleSearch, LocalExamplesProvider};
pub use query::{build, call_role, CallRole, QueryPlan, SearchCategory};
pub use resolve::{
    not_found_snippet, resolve, MethodElement, MethodSnippet, ResolveTask, WorkspaceElement,
    WorkspaceModel,
};
pub use selection::{SelectedElement, SelectionEvent};
pub use view::{ExampleList, ExampleRow, UiExecutor, THROTTLED_NOTICE};
