//! Modal controller: the section overlay and the item overlay.
//!
//! The two overlays are independent surfaces. The item overlay stacks above the
//! section overlay; closing either leaves the other untouched.

use super::surface::{Surface, SurfaceState};
use crate::domain::{Id, Item, LoadError};
use crate::loader::ApiRequest;

/// Title shown on the item overlay until the item arrives.
pub const ITEM_LOADING_TITLE: &str = "جاري التحميل...";

/// Identifies one of the two overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Section,
    Item,
}

/// Overlay listing the items of one section.
#[derive(Debug, Clone, Default)]
pub struct SectionOverlay {
    surface: Surface<Vec<Item>>,
    section: Option<Id>,
    header: String,
    selected: usize,
}

impl SectionOverlay {
    /// Opens the overlay for a section and returns the request to issue.
    pub fn open(&mut self, section: Id, name: &str, icon: &str) -> (ApiRequest, u64) {
        let generation = self.surface.open();
        self.header = format!("{icon} {name}");
        self.selected = 0;
        self.section = Some(section.clone());
        (ApiRequest::SectionDetail { section }, generation)
    }

    pub fn apply(&mut self, section: &Id, generation: u64, items: Result<Vec<Item>, LoadError>) -> bool {
        if self.section.as_ref() != Some(section) {
            return false;
        }
        self.surface.resolve(generation, items)
    }

    pub fn close(&mut self) {
        self.surface.close();
        self.section = None;
        self.selected = 0;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.surface.is_open()
    }

    #[must_use]
    pub const fn state(&self) -> &SurfaceState<Vec<Item>> {
        self.surface.state()
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    #[must_use]
    pub const fn section(&self) -> Option<&Id> {
        self.section.as_ref()
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Currently highlighted item, once loaded.
    #[must_use]
    pub fn selected(&self) -> Option<&Item> {
        self.surface.loaded().and_then(|items| items.get(self.selected))
    }

    pub fn select(&mut self, index: usize) {
        let len = self.surface.loaded().map_or(0, Vec::len);
        self.selected = index.min(len.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        let len = self.surface.loaded().map_or(0, Vec::len);
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn move_up(&mut self) {
        let len = self.surface.loaded().map_or(0, Vec::len);
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }
}

/// Overlay showing a single item.
#[derive(Debug, Clone, Default)]
pub struct ItemOverlay {
    surface: Surface<Item>,
    target: Option<(Id, Id)>,
    scroll: usize,
}

impl ItemOverlay {
    /// Opens the overlay for an item and returns the request to issue.
    pub fn open(&mut self, section: Id, item: Id) -> (ApiRequest, u64) {
        let generation = self.surface.open();
        self.scroll = 0;
        self.target = Some((section.clone(), item.clone()));
        (ApiRequest::Item { section, item }, generation)
    }

    pub fn apply(&mut self, section: &Id, item: &Id, generation: u64, result: Result<Item, LoadError>) -> bool {
        match &self.target {
            Some((s, i)) if s == section && i == item => self.surface.resolve(generation, result),
            _ => false,
        }
    }

    pub fn close(&mut self) {
        self.surface.close();
        self.target = None;
        self.scroll = 0;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.surface.is_open()
    }

    #[must_use]
    pub const fn state(&self) -> &SurfaceState<Item> {
        self.surface.state()
    }

    /// Overlay title: the item title once loaded, the loading text otherwise.
    #[must_use]
    pub fn title(&self) -> &str {
        self.surface.loaded().map_or(ITEM_LOADING_TITLE, |item| item.title.as_str())
    }

    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scrolls the body; the renderer clamps to the wrapped line count.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
    }

    pub fn clamp_scroll(&mut self, max: usize) {
        self.scroll = self.scroll.min(max);
    }
}

/// Both overlays, in stacking order.
#[derive(Debug, Clone, Default)]
pub struct ModalController {
    pub section: SectionOverlay,
    pub item: ItemOverlay,
}

impl ModalController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Topmost open overlay.
    #[must_use]
    pub fn top(&self) -> Option<Overlay> {
        if self.item.is_open() {
            Some(Overlay::Item)
        } else if self.section.is_open() {
            Some(Overlay::Section)
        } else {
            None
        }
    }

    pub fn close(&mut self, overlay: Overlay) {
        match overlay {
            Overlay::Section => self.section.close(),
            Overlay::Item => self.item.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> Item {
        Item {
            id: Id::new(id),
            title: title.into(),
            content: String::new(),
        }
    }

    #[test]
    fn section_header_is_set_synchronously() {
        let mut overlay = SectionOverlay::default();
        let (request, _) = overlay.open(Id::new("s1"), "Books", "📚");
        assert_eq!(overlay.header(), "📚 Books");
        assert_eq!(overlay.state(), &SurfaceState::Loading);
        assert_eq!(request, ApiRequest::SectionDetail { section: Id::new("s1") });
    }

    #[test]
    fn last_opened_section_wins() {
        let mut overlay = SectionOverlay::default();
        let (_, first) = overlay.open(Id::new("s1"), "One", "1");
        let (_, second) = overlay.open(Id::new("s2"), "Two", "2");
        assert!(overlay.apply(&Id::new("s2"), second, Ok(vec![item("b", "B")])));
        assert!(!overlay.apply(&Id::new("s1"), first, Ok(vec![item("a", "A")])));
        assert_eq!(overlay.header(), "2 Two");
        assert_eq!(overlay.selected().map(|i| i.title.as_str()), Some("B"));
    }

    #[test]
    fn item_title_follows_state() {
        let mut overlay = ItemOverlay::default();
        let (_, token) = overlay.open(Id::new("s1"), Id::new("i1"));
        assert_eq!(overlay.title(), ITEM_LOADING_TITLE);
        overlay.apply(&Id::new("s1"), &Id::new("i1"), token, Ok(item("i1", "T")));
        assert_eq!(overlay.title(), "T");
    }

    #[test]
    fn failed_item_keeps_loading_title() {
        let mut overlay = ItemOverlay::default();
        let (_, token) = overlay.open(Id::new("s1"), Id::new("i1"));
        overlay.apply(&Id::new("s1"), &Id::new("i1"), token, Err(LoadError::Decode("x".into())));
        assert_eq!(overlay.state(), &SurfaceState::Failed);
        assert_eq!(overlay.title(), ITEM_LOADING_TITLE);
    }

    #[test]
    fn closing_one_overlay_keeps_the_other() {
        let mut modals = ModalController::new();
        modals.section.open(Id::new("s1"), "Books", "📚");
        modals.item.open(Id::new("s1"), Id::new("i1"));
        assert_eq!(modals.top(), Some(Overlay::Item));
        modals.close(Overlay::Item);
        assert_eq!(modals.top(), Some(Overlay::Section));
        modals.close(Overlay::Section);
        assert_eq!(modals.top(), None);
    }

    #[test]
    fn scroll_never_goes_negative() {
        let mut overlay = ItemOverlay::default();
        overlay.scroll_by(-3);
        assert_eq!(overlay.scroll(), 0);
        overlay.scroll_by(5);
        overlay.clamp_scroll(2);
        assert_eq!(overlay.scroll(), 2);
    }
}
