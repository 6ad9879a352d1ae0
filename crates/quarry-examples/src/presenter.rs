//! Connects a finished search to the result list widget.
//!
//! The view asks for rows lazily as they scroll into sight. Each request
//! becomes a pool job that resolves the hit and posts the content back
//! to the UI thread, where it is dropped silently if the view was
//! disposed in the meantime.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::debug;

use crate::executor::{panic_message, RenderPool, SubmitError};
use crate::provider::ExampleSearch;
use crate::resolve::{resolve, ResolveTask, WorkspaceModel};
use crate::view::{ExampleList, ExampleRow, UiExecutor};

pub struct ExamplesPresenter {
    search: ExampleSearch,
    workspace: Arc<dyn WorkspaceModel>,
    view: Arc<dyn ExampleList>,
    ui: Arc<dyn UiExecutor>,
    pool: RenderPool,
}

impl ExamplesPresenter {
    pub fn new(
        search: ExampleSearch,
        workspace: Arc<dyn WorkspaceModel>,
        view: Arc<dyn ExampleList>,
        ui: Arc<dyn UiExecutor>,
    ) -> Self {
        ExamplesPresenter::with_pool(search, workspace, view, ui, RenderPool::new())
    }

    /// Like [`ExamplesPresenter::new`] with a caller-supplied pool; an
    /// inline pool makes [`ExamplesPresenter::update_row`] synchronous.
    pub fn with_pool(
        search: ExampleSearch,
        workspace: Arc<dyn WorkspaceModel>,
        view: Arc<dyn ExampleList>,
        ui: Arc<dyn UiExecutor>,
        pool: RenderPool,
    ) -> Self {
        ExamplesPresenter {
            search,
            workspace,
            view,
            ui,
            pool,
        }
    }

    pub fn search(&self) -> &ExampleSearch {
        &self.search
    }

    pub fn row_count(&self) -> usize {
        self.search.result.len()
    }

    /// Schedules resolution of one row.
    ///
    /// Out-of-range rows are ignored. When the queue is saturated the
    /// row immediately shows the throttle notice instead; selecting the
    /// item again retries.
    pub fn update_row(&self, row: usize) {
        let Some(hit) = self.search.result.hits.get(row) else {
            return;
        };
        let task = ResolveTask {
            row,
            doc: Arc::clone(&hit.doc),
            category: self.search.category,
            fallback_highlight: self.search.fallback_highlight.clone(),
        };
        let workspace = Arc::clone(&self.workspace);
        let view = Arc::clone(&self.view);
        let ui = Arc::clone(&self.ui);
        let job = move || {
            let content =
                match catch_unwind(AssertUnwindSafe(|| resolve(workspace.as_ref(), &task))) {
                    Ok(content) => content,
                    Err(payload) => ExampleRow::Failed {
                        detail: format!(
                            "row resolution panicked: {}",
                            panic_message(payload.as_ref())
                        ),
                    },
                };
            deliver(&ui, &view, task.row, content);
        };
        match self.pool.submit(job) {
            Ok(()) => {}
            Err(SubmitError::Saturated) => {
                debug!(
                    target: "quarry.examples",
                    row,
                    "render queue saturated, showing throttle notice"
                );
                deliver(&self.ui, &self.view, row, ExampleRow::Throttled);
            }
            // The view is going away; nobody is left to read the row.
            Err(SubmitError::ShutDown) => {}
        }
    }

    /// Stops background resolution and waits for in-flight jobs.
    ///
    /// Dropping the presenter does the same through the pool.
    pub fn dispose(&self) {
        self.pool.shutdown();
    }
}

fn deliver(ui: &Arc<dyn UiExecutor>, view: &Arc<dyn ExampleList>, row: usize, content: ExampleRow) {
    let view = Arc::clone(view);
    ui.post(Box::new(move || {
        // Disposal races delivery; checking here, on the UI thread, is
        // what makes the race benign.
        if view.is_disposed() {
            return;
        }
        view.replace(row, content);
    }));
}
