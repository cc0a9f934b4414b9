//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the plugin shows: the catalog
//! store, the stats and their animator, both overlays, and the search panel.
//! The event handler mutates it through named transitions; the renderer only
//! ever reads it, through [`AppState::compute_viewmodel`].
//!
//! # Example
//!
//! ```rust
//! use maktaba::app::{AppState, Settings};
//! use maktaba::ui::Theme;
//!
//! let state = AppState::new(Theme::default(), Settings::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.results.is_none());
//! ```

use super::animator::StatsAnimator;
use super::modal::ModalController;
use super::modes::{Anchor, InputMode};
use super::search::SearchController;
use super::store::{CatalogStatus, CatalogStore};
use super::surface::SurfaceState;
use crate::domain::{classify, ContentKind, Item, Section, Stats};
use crate::ui::helpers::{index_ranges, sanitize, wrap};
use crate::ui::layout::{visible_window, Layout};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    no_results, CardItem, EmptyState, FilterBarInfo, FilterLabel, FooterInfo, HeaderInfo, ItemBody, ItemModalView,
    ListView, ModalRow, ResultRow, ResultsView, SearchBarInfo, SectionModalView, UIViewModel, CONTENT_FAILED,
    LOADING, NO_SECTIONS, SEARCHING, SEARCH_FAILED, SECTIONS_FAILED, SECTION_EMPTY,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Default link shown for file items.
pub const DEFAULT_FILE_LINK: &str = "https://t.me/YOUR_BOT_USERNAME";

/// Behavior knobs resolved from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub counter_duration_ms: u64,
    pub counter_steps: u32,
    /// External link offered for file items.
    pub file_link: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            counter_duration_ms: 2000,
            counter_steps: 60,
            file_link: DEFAULT_FILE_LINK.to_string(),
        }
    }
}

/// Pane size in character cells, updated on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Sections, filter, load status and grid cursor.
    pub catalog: CatalogStore,

    /// Header stats, set once by the startup load.
    pub stats: Option<Stats>,

    /// Token of the in-flight stats request.
    pub stats_generation: u64,

    pub animator: StatsAnimator,

    /// Section and item overlays.
    pub modals: ModalController,

    /// Search input and results panel.
    pub search: SearchController,

    pub input_mode: InputMode,

    /// Which list keyboard navigation applies to when no overlay is open.
    pub anchor: Anchor,

    pub settings: Settings,

    pub theme: Theme,

    /// Last known pane size, used for hit-testing and scroll limits.
    pub viewport: Viewport,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme, settings: Settings) -> Self {
        Self {
            catalog: CatalogStore::new(),
            stats: None,
            stats_generation: 0,
            animator: StatsAnimator::new(),
            modals: ModalController::new(),
            search: SearchController::new(),
            input_mode: InputMode::Browse,
            anchor: Anchor::Sections,
            settings,
            theme,
            viewport: Viewport::default(),
        }
    }

    /// Frame geometry for the current viewport.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::compute(self.viewport.rows, self.viewport.cols, self.search.is_visible())
    }

    /// Largest useful scroll offset of the item overlay body.
    #[must_use]
    pub fn max_item_scroll(&self) -> usize {
        let rect = self.layout().item_modal;
        match self.modals.item.state() {
            SurfaceState::Loaded(item) if classify(&item.content) == ContentKind::Text => {
                wrap(&item.content, rect.content_width())
                    .len()
                    .saturating_sub(rect.content_height())
            }
            _ => 0,
        }
    }

    /// Computes a renderable view model for a pane of `rows` × `cols` cells.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let layout = Layout::compute(rows, cols, self.search.is_visible());

        UIViewModel {
            layout,
            header: self.compute_header(),
            filter_bar: self.compute_filter_bar(),
            search_bar: SearchBarInfo {
                query: sanitize(self.search.input()),
                is_typing: self.input_mode == InputMode::Typing,
            },
            grid: self.compute_grid(layout.grid.height),
            results: self
                .search
                .is_visible()
                .then(|| self.compute_results(layout.results_rows())),
            section_modal: self
                .modals
                .section
                .is_open()
                .then(|| self.compute_section_modal(layout.section_modal.content_height())),
            item_modal: self.modals.item.is_open().then(|| {
                self.compute_item_modal(layout.item_modal.content_width(), layout.item_modal.content_height())
            }),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let counters = self.stats.as_ref().map(|_| {
            let values = self.animator.values();
            let value = |i: usize| values.get(i).copied().unwrap_or(0);
            format!(
                "📚 {} قسم  ·  📝 {} عنصر  ·  ✅ {} قسم بمحتوى",
                value(0),
                value(1),
                value(2)
            )
        });

        HeaderInfo {
            title: "📚 مكتبة المحتوى".to_string(),
            counters,
            updated: self.stats.as_ref().and_then(Stats::updated_label),
        }
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        let active = self.catalog.filter();
        let labels = self
            .catalog
            .filter_options()
            .into_iter()
            .map(|option| FilterLabel {
                text: sanitize(option.label()),
                is_active: option == *active,
            })
            .collect();
        FilterBarInfo { labels }
    }

    fn compute_grid(&self, height: usize) -> ListView<CardItem> {
        let is_focused = self.anchor == Anchor::Sections;
        let empty = |state: EmptyState| ListView {
            rows: vec![],
            empty_state: Some(state),
            is_focused,
        };

        match self.catalog.status() {
            CatalogStatus::Loading => return empty(EmptyState::loading(LOADING)),
            CatalogStatus::Failed => return empty(EmptyState::failed(SECTIONS_FAILED)),
            CatalogStatus::Ready => {}
        }

        let visible = self.catalog.visible();
        if visible.is_empty() {
            return empty(EmptyState::empty("📭", NO_SECTIONS));
        }

        let selected = self.catalog.selected_index();
        let start = visible_window(selected, visible.len(), height);
        let rows = visible
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .map(|(index, section)| CardItem {
                text: card_text(section),
                is_selected: is_focused && index == selected,
            })
            .collect();

        ListView {
            rows,
            empty_state: None,
            is_focused,
        }
    }

    fn compute_results(&self, height: usize) -> ResultsView {
        let query = sanitize(self.search.submitted());
        let is_focused = self.anchor == Anchor::Results;
        let title = format!("🔍 نتائج البحث: \"{query}\"");
        let list = |rows: Vec<ResultRow>, empty_state: Option<EmptyState>| ResultsView {
            title: title.clone(),
            list: ListView {
                rows,
                empty_state,
                is_focused,
            },
        };

        let results = match self.search.state() {
            SurfaceState::Closed | SurfaceState::Loading => {
                return list(vec![], Some(EmptyState::loading(SEARCHING)));
            }
            SurfaceState::Failed => return list(vec![], Some(EmptyState::failed(SEARCH_FAILED))),
            SurfaceState::Loaded(results) if results.is_empty() => {
                return list(vec![], Some(EmptyState::empty("🔍", no_results(&query))));
            }
            SurfaceState::Loaded(results) => results,
        };

        let matcher = SkimMatcherV2::default();
        let selected = self.search.selected_index();
        let start = visible_window(selected, results.len(), height);
        let rows = results
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .map(|(index, result)| {
                let title = sanitize(&result.item.title);
                ResultRow {
                    highlight_ranges: highlight_ranges(&matcher, &title, &query),
                    title,
                    section_label: format!("القسم: {}", sanitize(result.section.as_str())),
                    tag: classify(&result.item.content),
                    is_selected: is_focused && index == selected,
                }
            })
            .collect();

        list(rows, None)
    }

    fn compute_section_modal(&self, height: usize) -> SectionModalView {
        let overlay = &self.modals.section;
        let list = |rows: Vec<ModalRow>, empty_state: Option<EmptyState>| SectionModalView {
            header: sanitize(overlay.header()),
            list: ListView {
                rows,
                empty_state,
                is_focused: true,
            },
        };

        let items = match overlay.state() {
            SurfaceState::Closed | SurfaceState::Loading => return list(vec![], Some(EmptyState::loading(LOADING))),
            SurfaceState::Failed => return list(vec![], Some(EmptyState::failed(CONTENT_FAILED))),
            SurfaceState::Loaded(items) if items.is_empty() => {
                return list(vec![], Some(EmptyState::empty("📭", SECTION_EMPTY)));
            }
            SurfaceState::Loaded(items) => items,
        };

        let selected = overlay.selected_index();
        let start = visible_window(selected, items.len(), height);
        let rows = items
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .map(|(index, item)| ModalRow {
                title: sanitize(&item.title),
                tag: classify(&item.content),
                is_selected: index == selected,
            })
            .collect();

        list(rows, None)
    }

    fn compute_item_modal(&self, width: usize, height: usize) -> ItemModalView {
        let overlay = &self.modals.item;
        let body = match overlay.state() {
            SurfaceState::Closed | SurfaceState::Loading => ItemBody::Loading,
            SurfaceState::Failed => ItemBody::Failed(EmptyState::failed(CONTENT_FAILED)),
            SurfaceState::Loaded(item) => self.item_body(item, overlay.scroll(), width, height),
        };

        ItemModalView {
            title: sanitize(overlay.title()),
            body,
        }
    }

    fn item_body(&self, item: &Item, scroll: usize, width: usize, height: usize) -> ItemBody {
        match classify(&item.content) {
            ContentKind::File => ItemBody::File {
                link: self.settings.file_link.clone(),
            },
            ContentKind::Text => {
                let wrapped = wrap(&item.content, width);
                let start = scroll.min(wrapped.len().saturating_sub(height));
                let has_more = start + height < wrapped.len();
                ItemBody::Text {
                    lines: wrapped.into_iter().skip(start).take(height).collect(),
                    has_more,
                }
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        use super::modal::Overlay;

        let keybindings = match (self.modals.top(), self.input_mode, self.anchor) {
            (Some(Overlay::Item), _, _) => {
                let is_file = matches!(
                    self.modals.item.state(),
                    SurfaceState::Loaded(item) if classify(&item.content) == ContentKind::File
                );
                if is_file {
                    "o: open link  Esc/q: close".to_string()
                } else {
                    "j/k: scroll  Esc/q: close".to_string()
                }
            }
            (Some(Overlay::Section), _, _) => "j/k: navigate  Enter: open item  Esc/q: close".to_string(),
            (None, InputMode::Typing, _) => "Enter: search  Esc: stop typing  Type to edit query".to_string(),
            (None, InputMode::Browse, Anchor::Results) => {
                "j/k: navigate  Enter: open  Tab: sections  /: search  Esc: close results  q: quit".to_string()
            }
            (None, InputMode::Browse, Anchor::Sections) => {
                "j/k: navigate  Enter: open  h/l: filter  /: search  Tab: results  r: reload  q: quit".to_string()
            }
        };

        FooterInfo { keybindings }
    }
}

/// Card label of a section.
#[must_use]
pub fn card_text(section: &Section) -> String {
    format!(
        "{} {} — {} عنصر — {}",
        sanitize(&section.icon),
        sanitize(&section.name),
        section.count,
        sanitize(&section.category)
    )
}

fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    matcher
        .fuzzy_indices(text, query)
        .map_or_else(Vec::new, |(_score, indices)| index_ranges(&indices))
}
