//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel) and
//! consumed by the renderer. They hold display-ready, already sanitized text,
//! already windowed to the space available, and no business logic.

use super::layout::Layout;

pub const NO_SECTIONS: &str = "لا توجد أقسام متاحة";
pub const SECTIONS_FAILED: &str = "حدث خطأ في تحميل الأقسام";
pub const SECTION_EMPTY: &str = "لا يوجد محتوى في هذا القسم";
pub const CONTENT_FAILED: &str = "حدث خطأ في تحميل المحتوى";
pub const SEARCH_FAILED: &str = "حدث خطأ في البحث";
pub const LOADING: &str = "جاري التحميل...";
pub const SEARCHING: &str = "جاري البحث...";
pub const FILE_NOTICE: &str = "📄 هذا المحتوى عبارة عن ملف";
pub const FILE_HINT: &str = "للوصول إلى الملف، يرجى استخدام البوت على تليجرام";
pub const FILE_LINK_LABEL: &str = "فتح في تليجرام ✈️";

/// "No results" message quoting the submitted query.
#[must_use]
pub fn no_results(query: &str) -> String {
    format!("لم يتم العثور على نتائج لـ \"{query}\"")
}

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub layout: Layout,
    pub header: HeaderInfo,
    pub filter_bar: FilterBarInfo,
    pub search_bar: SearchBarInfo,
    pub grid: ListView<CardItem>,
    /// Present while the search panel is visible.
    pub results: Option<ResultsView>,
    pub section_modal: Option<SectionModalView>,
    pub item_modal: Option<ItemModalView>,
    pub footer: FooterInfo,
}

/// Title bar and animated counters.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// Counter line, e.g. `📚 12 قسم · 📝 340 عنصر · ✅ 9 أقسام بمحتوى`.
    pub counters: Option<String>,
    /// Formatted `last_updated`, when known.
    pub updated: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub labels: Vec<FilterLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterLabel {
    pub text: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    pub is_typing: bool,
}

/// A windowed list with an optional empty state replacing its rows.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    pub rows: Vec<T>,
    pub empty_state: Option<EmptyState>,
    pub is_focused: bool,
}

/// One section card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// `"{icon} {name} — {count} عنصر — {category}"`
    pub text: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct ResultsView {
    pub title: String,
    pub list: ListView<ResultRow>,
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    /// Character ranges of `title` matching the query, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
    /// `القسم: {section}`
    pub section_label: String,
    pub tag: crate::domain::ContentKind,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct SectionModalView {
    pub header: String,
    pub list: ListView<ModalRow>,
}

/// One item row inside the section overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalRow {
    pub title: String,
    pub tag: crate::domain::ContentKind,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
pub struct ItemModalView {
    pub title: String,
    pub body: ItemBody,
}

/// Body of the item overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemBody {
    Loading,
    Failed(EmptyState),
    /// Wrapped, sanitized text lines already scrolled into view.
    Text {
        lines: Vec<String>,
        /// Whether more lines exist below the window.
        has_more: bool,
    },
    /// File payloads never show the raw content.
    File { link: String },
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message replacing a list that has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub icon: String,
    pub message: String,
    pub kind: EmptyKind,
}

/// Distinguishes failures from empty successes and pending loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    Loading,
    Empty,
    Failed,
}

impl EmptyState {
    #[must_use]
    pub fn loading(message: &str) -> Self {
        Self {
            icon: "⏳".into(),
            message: message.into(),
            kind: EmptyKind::Loading,
        }
    }

    #[must_use]
    pub fn empty(icon: &str, message: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            message: message.into(),
            kind: EmptyKind::Empty,
        }
    }

    #[must_use]
    pub fn failed(message: &str) -> Self {
        Self {
            icon: "⚠️".into(),
            message: message.into(),
            kind: EmptyKind::Failed,
        }
    }

    /// Single-line form, e.g. `📭 لا توجد أقسام متاحة`.
    #[must_use]
    pub fn line(&self) -> String {
        format!("{} {}", self.icon, self.message)
    }
}
