//! End-to-end flows through `handle_event` and the pure renderer.

use maktaba::app::{Anchor, Overlay, SurfaceState};
use maktaba::domain::{FilterState, Id};
use maktaba::loader::{ApiRequest, RequestContext, Response};
use maktaba::ui::layout::FILTER_ROW;
use maktaba::ui::render_to_frame;
use maktaba::{handle_event, Action, AppState, Event, Settings, Theme};

const ROWS: usize = 30;
const COLS: usize = 100;

fn state() -> AppState {
    AppState::new(Theme::default(), Settings::default())
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
}

fn fetches(actions: &[Action]) -> Vec<(ApiRequest, u64)> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::Fetch { request, generation } => Some((request.clone(), *generation)),
            _ => None,
        })
        .collect()
}

fn single_fetch(actions: &[Action]) -> (ApiRequest, u64) {
    let mut all = fetches(actions);
    assert_eq!(all.len(), 1, "expected one fetch, got {actions:?}");
    all.remove(0)
}

/// Simulates the host answering `request` with `status` and `body`.
fn respond(state: &mut AppState, request: ApiRequest, generation: u64, status: u16, body: &str) -> Vec<Action> {
    let context = RequestContext::from_map(&RequestContext::new(request, generation).to_map()).unwrap();
    let response = Response::decode(status, body.as_bytes(), &context);
    send(state, Event::Loaded(response))
}

fn screen(state: &AppState) -> String {
    render_to_frame(state, ROWS, COLS).plain_text()
}

const SECTIONS: &str = r#"[
    {"id": 1, "name": "Books", "icon": "📚", "count": 3, "category": "edu"},
    {"id": 2, "name": "Matches", "icon": "⚽", "count": 5, "category": "sports"},
    {"id": 3, "name": "Lectures", "icon": "🎓", "count": 0, "category": "edu"}
]"#;

fn loaded_catalog() -> AppState {
    let mut state = state();
    let actions = send(&mut state, Event::Startup);
    let (request, generation) = fetches(&actions)
        .into_iter()
        .find(|(request, _)| *request == ApiRequest::Sections)
        .unwrap();
    respond(&mut state, request, generation, 200, SECTIONS);
    state
}

#[test]
fn startup_fetches_stats_and_sections() {
    let mut state = state();
    let actions = send(&mut state, Event::Startup);
    let requests: Vec<ApiRequest> = fetches(&actions).into_iter().map(|(request, _)| request).collect();

    assert_eq!(requests, vec![ApiRequest::Stats, ApiRequest::Sections]);
    assert!(screen(&state).contains("جاري التحميل..."));
}

#[test]
fn category_filter_narrows_the_grid() {
    let mut state = loaded_catalog();
    let text = screen(&state);
    assert!(text.contains("📚 Books — 3 عنصر — edu"));
    assert!(text.contains("⚽ Matches — 5 عنصر — sports"));

    send(&mut state, Event::FilterSelected(FilterState::Category("sports".into())));
    let text = screen(&state);
    assert!(!text.contains("Books — 3"));
    assert!(text.contains("⚽ Matches — 5 عنصر — sports"));

    send(&mut state, Event::FilterSelected(FilterState::Category("edu".into())));
    let text = screen(&state);
    assert!(text.contains("📚 Books — 3 عنصر — edu"));
    assert!(text.contains("🎓 Lectures — 0 عنصر — edu"));
    assert!(!text.contains("Matches — 5"));

    send(&mut state, Event::FilterSelected(FilterState::All));
    assert!(screen(&state).contains("Matches — 5"));
}

#[test]
fn empty_and_failed_catalogs_differ() {
    let mut empty = state();
    let (request, generation) = single_fetch(&send(&mut empty, Event::CatalogReloaded));
    respond(&mut empty, request, generation, 200, "[]");
    let text = screen(&empty);
    assert!(text.contains("لا توجد أقسام متاحة"));
    assert!(!text.contains("حدث خطأ في تحميل الأقسام"));

    let mut failed = state();
    let (request, generation) = single_fetch(&send(&mut failed, Event::CatalogReloaded));
    respond(&mut failed, request, generation, 500, "boom");
    let text = screen(&failed);
    assert!(text.contains("حدث خطأ في تحميل الأقسام"));
    assert!(!text.contains("لا توجد أقسام متاحة"));
}

#[test]
fn reload_discards_the_earlier_response() {
    let mut state = state();
    let (request, first) = single_fetch(&send(&mut state, Event::CatalogReloaded));
    let (_, second) = single_fetch(&send(&mut state, Event::CatalogReloaded));

    respond(&mut state, request.clone(), first, 200, SECTIONS);
    assert!(screen(&state).contains("جاري التحميل..."));

    respond(&mut state, request, second, 200, "[]");
    assert!(screen(&state).contains("لا توجد أقسام متاحة"));
}

#[test]
fn whitespace_query_fetches_nothing() {
    let mut state = loaded_catalog();
    let actions = send(&mut state, Event::SearchSubmitted("   ".into()));

    assert!(fetches(&actions).is_empty());
    assert!(!state.search.is_visible());
    assert!(!screen(&state).contains("نتائج البحث"));
}

#[test]
fn search_results_open_the_item() {
    let mut state = loaded_catalog();
    let (request, generation) = single_fetch(&send(&mut state, Event::SearchSubmitted("  physics ".into())));
    assert_eq!(request, ApiRequest::Search { query: "physics".into() });
    assert!(screen(&state).contains("جاري البحث..."));

    respond(
        &mut state,
        request,
        generation,
        200,
        r#"[{"section": 1, "item": {"id": 7, "title": "Intro to physics", "content": "notes"}}]"#,
    );
    assert_eq!(state.anchor, Anchor::Results);
    let text = screen(&state);
    assert!(text.contains("Intro to physics"));
    assert!(text.contains("القسم: 1"));

    let (request, _) = single_fetch(&send(&mut state, Event::Activate));
    assert_eq!(
        request,
        ApiRequest::Item {
            section: Id::from("1"),
            item: Id::from("7"),
        }
    );
}

#[test]
fn search_with_no_hits_quotes_the_query() {
    let mut state = loaded_catalog();
    let (request, generation) = single_fetch(&send(&mut state, Event::SearchSubmitted("zzz".into())));
    respond(&mut state, request, generation, 200, "[]");

    assert!(screen(&state).contains("لم يتم العثور على نتائج لـ \"zzz\""));
}

#[test]
fn file_item_offers_link_instead_of_payload() {
    let mut state = loaded_catalog();
    let (request, generation) = single_fetch(&send(
        &mut state,
        Event::ItemOpened {
            section: Id::from("1"),
            item: Id::from("9"),
        },
    ));
    assert!(screen(&state).contains("جاري التحميل..."));
    assert!(send(&mut state, Event::OpenLink).is_empty());

    respond(&mut state, request, generation, 200, r#"{"id": 9, "title": "Scan", "content": "BQAxyz"}"#);

    let text = screen(&state);
    assert!(text.contains("Scan"));
    assert!(text.contains("هذا المحتوى عبارة عن ملف"));
    assert!(!text.contains("BQAxyz"));

    let actions = send(&mut state, Event::OpenLink);
    assert_eq!(
        actions,
        vec![Action::OpenLink {
            url: "https://t.me/YOUR_BOT_USERNAME".into()
        }]
    );
}

#[test]
fn text_item_shows_sanitized_content() {
    let mut state = loaded_catalog();
    let (request, generation) = single_fetch(&send(
        &mut state,
        Event::ItemOpened {
            section: Id::from("1"),
            item: Id::from("2"),
        },
    ));
    respond(
        &mut state,
        request,
        generation,
        200,
        r#"{"id": 2, "title": "Poem", "content": "line one\n\u001b[31mline two"}"#,
    );

    let text = screen(&state);
    assert!(text.contains("line one"));
    assert!(text.contains("line two"));
    assert!(!render_to_frame(&state, ROWS, COLS).to_ansi().contains("\u{1b}[31m"));
    assert!(send(&mut state, Event::OpenLink).is_empty());
}

#[test]
fn stale_section_response_is_ignored() {
    let mut state = loaded_catalog();
    let (first, first_generation) = single_fetch(&send(
        &mut state,
        Event::SectionOpened {
            id: Id::from("s1"),
            name: "First".into(),
            icon: "📚".into(),
        },
    ));
    let (second, second_generation) = single_fetch(&send(
        &mut state,
        Event::SectionOpened {
            id: Id::from("s2"),
            name: "Second".into(),
            icon: "⚽".into(),
        },
    ));

    respond(
        &mut state,
        first,
        first_generation,
        200,
        r#"{"items": [{"id": 1, "title": "from s1", "content": "x"}]}"#,
    );
    assert!(matches!(state.modals.section.state(), SurfaceState::Loading));
    assert!(!screen(&state).contains("from s1"));

    respond(
        &mut state,
        second,
        second_generation,
        200,
        r#"{"items": [{"id": 1, "title": "from s2", "content": "x"}]}"#,
    );
    let text = screen(&state);
    assert!(text.contains("⚽ Second"));
    assert!(text.contains("from s2"));
    assert!(!text.contains("from s1"));
}

#[test]
fn empty_section_shows_message() {
    let mut state = loaded_catalog();
    let (request, generation) = single_fetch(&send(
        &mut state,
        Event::SectionOpened {
            id: Id::from("3"),
            name: "Lectures".into(),
            icon: "🎓".into(),
        },
    ));
    respond(&mut state, request, generation, 200, r#"{"items": []}"#);

    assert!(screen(&state).contains("لا يوجد محتوى في هذا القسم"));
}

#[test]
fn backdrop_click_dismisses_only_the_top_overlay() {
    let mut state = loaded_catalog();
    state.viewport = maktaba::app::Viewport { rows: ROWS, cols: COLS };

    let (request, generation) = single_fetch(&send(&mut state, Event::Activate));
    assert_eq!(request, ApiRequest::SectionDetail { section: Id::from("1") });
    respond(
        &mut state,
        request,
        generation,
        200,
        r#"{"items": [{"id": 4, "title": "Chapter", "content": "hello"}]}"#,
    );

    let layout = state.layout();
    let row = layout.section_modal.content_top();
    let col = layout.section_modal.x + 4;
    let (request, _) = single_fetch(&send(&mut state, Event::Click { line: row, col }));
    assert_eq!(
        request,
        ApiRequest::Item {
            section: Id::from("1"),
            item: Id::from("4"),
        }
    );
    assert_eq!(state.modals.top(), Some(Overlay::Item));

    send(&mut state, Event::Click { line: 0, col: 0 });
    assert_eq!(state.modals.top(), Some(Overlay::Section));
    assert!(state.modals.section.is_open());

    send(&mut state, Event::Click { line: 0, col: 0 });
    assert_eq!(state.modals.top(), None);
}

#[test]
fn stats_counters_animate_to_their_targets() {
    let mut state = AppState::new(
        Theme::default(),
        Settings {
            counter_steps: 4,
            ..Settings::default()
        },
    );
    let actions = send(&mut state, Event::Startup);
    let (request, generation) = fetches(&actions)
        .into_iter()
        .find(|(request, _)| *request == ApiRequest::Stats)
        .unwrap();

    let actions = respond(
        &mut state,
        request,
        generation,
        200,
        r#"{"total_sections": 12, "total_items": 340, "sections_with_content": 9}"#,
    );
    assert!(matches!(actions.as_slice(), [Action::ScheduleTick { .. }]));

    let mut ticks = 0;
    while !send(&mut state, Event::Tick).is_empty() {
        ticks += 1;
        assert!(ticks < 10, "animation never finished");
    }

    let text = screen(&state);
    assert!(text.contains("12 قسم"));
    assert!(text.contains("340 عنصر"));
    assert!(text.contains("9 قسم بمحتوى"));
}

#[test]
fn filter_without_matches_shows_no_sections() {
    let mut state = state();
    let (request, generation) = single_fetch(&send(&mut state, Event::CatalogReloaded));
    respond(
        &mut state,
        request,
        generation,
        200,
        r#"[{"id": "s1", "name": "Books", "icon": "📚", "count": 3, "category": "edu"}]"#,
    );

    send(&mut state, Event::FilterSelected(FilterState::Category("edu".into())));
    assert!(screen(&state).contains("📚 Books — 3 عنصر — edu"));

    send(&mut state, Event::FilterSelected(FilterState::Category("sports".into())));
    let text = screen(&state);
    assert!(!text.contains("Books — 3"));
    assert!(text.contains("لا توجد أقسام متاحة"));
}

#[test]
fn failed_stats_leave_the_header_without_counters() {
    let mut state = state();
    let actions = send(&mut state, Event::Startup);
    let (request, generation) = fetches(&actions)
        .into_iter()
        .find(|(request, _)| *request == ApiRequest::Stats)
        .unwrap();

    let actions = respond(&mut state, request, generation, 500, "internal error");
    assert!(actions.is_empty());
    assert!(send(&mut state, Event::Tick).is_empty());
    assert!(!screen(&state).contains("قسم بمحتوى"));
}

#[test]
fn failed_section_detail_shows_content_error() {
    let mut state = loaded_catalog();
    let (request, generation) = single_fetch(&send(
        &mut state,
        Event::SectionOpened {
            id: Id::from("1"),
            name: "Books".into(),
            icon: "📚".into(),
        },
    ));
    respond(&mut state, request, generation, 500, "boom");

    assert!(matches!(state.modals.section.state(), SurfaceState::Failed));
    let text = screen(&state);
    assert!(text.contains("📚 Books"));
    assert!(text.contains("حدث خطأ في تحميل المحتوى"));
    assert!(!text.contains("لا يوجد محتوى في هذا القسم"));
}

#[test]
fn missing_item_shows_content_error_and_no_link() {
    let mut state = loaded_catalog();
    let (request, generation) = single_fetch(&send(
        &mut state,
        Event::ItemOpened {
            section: Id::from("1"),
            item: Id::from("99"),
        },
    ));
    respond(&mut state, request, generation, 404, r#"{"error": "Item not found"}"#);

    assert!(matches!(state.modals.item.state(), SurfaceState::Failed));
    let text = screen(&state);
    assert!(text.contains("جاري التحميل..."));
    assert!(text.contains("حدث خطأ في تحميل المحتوى"));
    assert!(send(&mut state, Event::OpenLink).is_empty());
}

#[test]
fn filter_click_lands_on_the_rendered_chip() {
    let mut state = state();
    let (request, generation) = single_fetch(&send(&mut state, Event::CatalogReloaded));
    respond(
        &mut state,
        request,
        generation,
        200,
        r#"[
            {"id": 1, "name": "Books", "icon": "📚", "count": 3, "category": "edu\u001b\u001b\u001b"},
            {"id": 2, "name": "Matches", "icon": "⚽", "count": 5, "category": "sports"}
        ]"#,
    );
    state.viewport = maktaba::app::Viewport { rows: ROWS, cols: COLS };

    let frame = render_to_frame(&state, ROWS, COLS);
    let bar = &frame.plain_lines()[FILTER_ROW];
    let col = bar.find("sports").unwrap();
    assert!(bar[..col].is_ascii());

    send(&mut state, Event::Click { line: FILTER_ROW, col });
    assert_eq!(state.catalog.filter(), &FilterState::Category("sports".into()));
    let text = screen(&state);
    assert!(text.contains("⚽ Matches — 5 عنصر — sports"));
    assert!(!text.contains("Books — 3"));
}
