//! Reacts to editor selections by running a local example search.

use std::sync::Arc;
use std::time::{Duration, Instant};

use quarry_index::{CodeSearcher, SearchResult};
use tracing::{debug, trace, warn};

use crate::classify::classify;
use crate::config::ExamplesConfig;
use crate::query::{build, SearchCategory};
use crate::resolve::WorkspaceModel;
use crate::selection::SelectionEvent;

/// A completed search, ready to hand to a presenter.
#[derive(Debug, Clone)]
pub struct ExampleSearch {
    pub category: SearchCategory,
    /// Terms describing the query to the user, in discovery order.
    pub terms: Vec<String>,
    /// Highlight for rows whose document names no variable.
    pub fallback_highlight: String,
    pub result: SearchResult,
    pub elapsed: Duration,
}

/// Entry point of the examples feature.
///
/// One provider serves the whole session; it holds no per-selection
/// state, so concurrent selection events are safe, just wasteful.
pub struct LocalExamplesProvider {
    searcher: Arc<dyn CodeSearcher>,
    workspace: Arc<dyn WorkspaceModel>,
}

impl LocalExamplesProvider {
    pub fn new(searcher: Arc<dyn CodeSearcher>, workspace: Arc<dyn WorkspaceModel>) -> Self {
        LocalExamplesProvider { searcher, workspace }
    }

    /// Runs the full selection-to-results cycle.
    ///
    /// Returns `None` whenever the selection yields no query or the
    /// search fails; callers keep showing the previous results in that
    /// case rather than flashing an empty panel.
    pub fn handle_selection(
        &self,
        event: &SelectionEvent,
        config: &ExamplesConfig,
    ) -> Option<ExampleSearch> {
        let started = Instant::now();
        let Some(ctx) = classify(&event.tree, event.node) else {
            trace!(target: "quarry.examples", "selection does not classify");
            return None;
        };
        let Some(plan) = build(
            &event.tree,
            &ctx,
            &event.element,
            config,
            self.workspace.as_ref(),
        ) else {
            trace!(target: "quarry.examples", element = ?event.element, "no query for selection");
            return None;
        };

        let result = match self.searcher.search(&plan.query, config.max_hits) {
            Ok(result) => result,
            Err(err) => {
                warn!(target: "quarry.examples", error = %err, "example search failed");
                return None;
            }
        };
        let elapsed = started.elapsed();
        debug!(
            target: "quarry.examples",
            category = plan.category.label(),
            query = %plan.query,
            hits = result.len(),
            ?elapsed,
            "example search complete"
        );

        // The anchor clause names what the search was about; a
        // SHOULD-only query falls back to its first clause.
        let fallback_highlight = plan
            .query
            .must_value()
            .or_else(|| plan.query.clauses().first().map(|c| c.value.as_str()))
            .unwrap_or_default()
            .to_owned();
        Some(ExampleSearch {
            category: plan.category,
            terms: plan.display_terms,
            fallback_highlight,
            result,
            elapsed,
        })
    }
}
