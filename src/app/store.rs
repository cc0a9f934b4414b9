//! Catalog store: the section snapshot, the category filter, and the grid cursor.

use crate::domain::{filter_sections, FilterState, LoadError, Section};

/// Load status of the section catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready,
    Failed,
}

/// In-memory section catalog.
///
/// All mutation goes through [`set_sections`](Self::set_sections),
/// [`set_failed`](Self::set_failed) and [`set_filter`](Self::set_filter). The
/// visible subset is never stored; it is recomputed from `sections` and
/// `filter` on every read.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    sections: Vec<Section>,
    filter: FilterState,
    status: CatalogStatus,
    generation: u64,
    selected: usize,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            filter: FilterState::All,
            status: CatalogStatus::Loading,
            generation: 0,
            selected: 0,
        }
    }
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a (re)load and returns its generation token.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.status = CatalogStatus::Loading;
        self.generation
    }

    /// Applies a catalog response. Stale generations are discarded.
    pub fn apply(&mut self, generation: u64, result: Result<Vec<Section>, LoadError>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale catalog");
            return false;
        }
        match result {
            Ok(sections) => self.set_sections(sections),
            Err(_) => self.set_failed(),
        }
        true
    }

    /// Replaces the snapshot wholesale.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
        self.status = CatalogStatus::Ready;
        self.clamp_selection();
    }

    /// Marks the catalog as failed and empties it.
    pub fn set_failed(&mut self) {
        self.sections.clear();
        self.status = CatalogStatus::Failed;
        self.selected = 0;
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.selected = 0;
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn status(&self) -> CatalogStatus {
        self.status
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Sections passing the active filter, in catalog order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Section> {
        filter_sections(&self.sections, &self.filter)
    }

    /// Filter bar entries: `all`, then distinct categories in first-appearance order.
    #[must_use]
    pub fn filter_options(&self) -> Vec<FilterState> {
        let mut options = vec![FilterState::All];
        for section in &self.sections {
            let option = FilterState::Category(section.category.clone());
            if !options.contains(&option) {
                options.push(option);
            }
        }
        options
    }

    /// Moves the filter to the next (`forward`) or previous option, wrapping.
    pub fn cycle_filter(&mut self, forward: bool) {
        let options = self.filter_options();
        let len = options.len();
        let current = options.iter().position(|o| *o == self.filter).unwrap_or(0);
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        if let Some(filter) = options.into_iter().nth(next) {
            self.set_filter(filter);
        }
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Section> {
        self.visible().get(self.selected).copied()
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    pub fn move_down(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn move_up(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Id;

    fn section(id: &str, category: &str) -> Section {
        Section {
            id: Id::new(id),
            name: id.to_string(),
            icon: "📚".into(),
            count: 0,
            category: category.into(),
        }
    }

    #[test]
    fn starts_loading() {
        assert_eq!(CatalogStore::new().status(), CatalogStatus::Loading);
    }

    #[test]
    fn failure_empties_the_catalog() {
        let mut store = CatalogStore::new();
        let token = store.begin_load();
        store.apply(token, Ok(vec![section("a", "x")]));
        let token = store.begin_load();
        store.apply(token, Err(LoadError::Decode("x".into())));
        assert_eq!(store.status(), CatalogStatus::Failed);
        assert!(store.sections().is_empty());
    }

    #[test]
    fn stale_catalog_is_discarded() {
        let mut store = CatalogStore::new();
        let old = store.begin_load();
        let new = store.begin_load();
        assert!(store.apply(new, Ok(vec![section("new", "x")])));
        assert!(!store.apply(old, Ok(vec![section("old", "x")])));
        assert_eq!(store.sections()[0].id.as_str(), "new");
    }

    #[test]
    fn filter_options_in_first_appearance_order() {
        let mut store = CatalogStore::new();
        store.set_sections(vec![section("a", "edu"), section("b", "sports"), section("c", "edu")]);
        assert_eq!(
            store.filter_options(),
            vec![
                FilterState::All,
                FilterState::Category("edu".into()),
                FilterState::Category("sports".into()),
            ]
        );
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut store = CatalogStore::new();
        store.set_sections(vec![section("a", "edu"), section("b", "sports")]);
        store.cycle_filter(false);
        assert_eq!(store.filter(), &FilterState::Category("sports".into()));
        store.cycle_filter(true);
        assert_eq!(store.filter(), &FilterState::All);
        store.cycle_filter(true);
        assert_eq!(store.filter(), &FilterState::Category("edu".into()));
        assert_eq!(store.visible().len(), 1);
    }

    #[test]
    fn selection_wraps_within_visible() {
        let mut store = CatalogStore::new();
        store.set_sections(vec![section("a", "edu"), section("b", "sports"), section("c", "edu")]);
        store.set_filter(FilterState::Category("edu".into()));
        store.move_up();
        assert_eq!(store.selected().map(|s| s.id.as_str()), Some("c"));
        store.move_down();
        assert_eq!(store.selected().map(|s| s.id.as_str()), Some("a"));
    }

    #[test]
    fn selection_on_empty_grid_is_none() {
        let mut store = CatalogStore::new();
        store.set_sections(vec![section("a", "edu")]);
        store.set_filter(FilterState::Category("sports".into()));
        store.move_down();
        assert_eq!(store.selected(), None);
    }
}
