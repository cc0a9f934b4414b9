//! Search controller: query editing, submission, and the results panel.

use super::surface::{Surface, SurfaceState};
use crate::domain::{LoadError, SearchResult};
use crate::loader::ApiRequest;

/// Outcome of [`SearchController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The trimmed query was empty; the panel was hidden and the input cleared.
    Closed,
    /// The panel now shows the loading state; issue this request.
    Fetch(ApiRequest, u64),
}

/// Search input plus the results panel.
///
/// The panel lifecycle is independent of the overlays. `submitted` is the
/// query the panel is showing results for; `input` is what the user is
/// currently editing.
#[derive(Debug, Clone, Default)]
pub struct SearchController {
    input: String,
    submitted: String,
    results: Surface<Vec<SearchResult>>,
    selected: usize,
}

impl SearchController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Submits `query`, superseding any in-flight search.
    pub fn submit(&mut self, query: &str) -> Submission {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.close();
            return Submission::Closed;
        }

        let generation = self.results.open();
        self.submitted = trimmed.to_string();
        self.selected = 0;
        Submission::Fetch(
            ApiRequest::Search {
                query: self.submitted.clone(),
            },
            generation,
        )
    }

    /// Hides the panel and clears the input.
    pub fn close(&mut self) {
        self.results.close();
        self.input.clear();
        self.submitted.clear();
        self.selected = 0;
    }

    pub fn apply(&mut self, query: &str, generation: u64, results: Result<Vec<SearchResult>, LoadError>) -> bool {
        if query != self.submitted {
            return false;
        }
        self.results.resolve(generation, results)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.results.is_open()
    }

    #[must_use]
    pub fn submitted(&self) -> &str {
        &self.submitted
    }

    #[must_use]
    pub const fn state(&self) -> &SurfaceState<Vec<SearchResult>> {
        self.results.state()
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.loaded().and_then(|results| results.get(self.selected))
    }

    pub fn select(&mut self, index: usize) {
        let len = self.results.loaded().map_or(0, Vec::len);
        self.selected = index.min(len.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        let len = self.results.loaded().map_or(0, Vec::len);
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn move_up(&mut self) {
        let len = self.results.loaded().map_or(0, Vec::len);
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }
}
