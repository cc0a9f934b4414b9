//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. It receives both raw
//! navigation events (produced by the key and mouse mapping in the plugin
//! shim) and the typed commands they resolve to, and returns whether a
//! re-render is needed plus the side effects to run.
//!
//! # Event Types
//!
//! - **Commands**: `FilterSelected`, `SectionOpened`, `ItemOpened`,
//!   `SearchSubmitted`, `OverlayDismissed`, `AnchorNavigated`, `CatalogReloaded`
//! - **Navigation**: `KeyDown`, `KeyUp`, `Activate`, `NextFilter`, `PrevFilter`,
//!   `NextAnchor`, `Click`
//! - **Input**: `FocusSearch`, `Char`, `Backspace`, `Escape`
//! - **System**: `Startup`, `Tick`, `Loaded`, `OpenLink`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use maktaba::app::{handle_event, Action, AppState, Event, Settings};
//! use maktaba::loader::ApiRequest;
//! use maktaba::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Settings::default());
//! let (render, actions) = handle_event(&mut state, &Event::Startup)?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Fetch { request: ApiRequest::Stats, .. }));
//! # Ok::<(), maktaba::MaktabaError>(())
//! ```

use super::modal::Overlay;
use super::modes::{Anchor, InputMode};
use super::search::Submission;
use super::surface::SurfaceState;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{classify, ContentKind, FilterState, Id};
use crate::loader::{ApiRequest, Payload, Response};
use crate::ui::layout::{filter_spans, visible_window, FILTER_ROW};
use crate::ui::helpers::sanitize;

/// Events triggered by user input, timers, or completed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Web access granted: load stats and the catalog.
    Startup,

    /// Shows only sections of a category (or all of them).
    FilterSelected(FilterState),
    /// Opens the section overlay.
    SectionOpened {
        id: Id,
        name: String,
        icon: String,
    },
    /// Opens the item overlay above whatever else is open.
    ItemOpened {
        section: Id,
        item: Id,
    },
    /// Submits a search query; blank queries close the results panel.
    SearchSubmitted(String),
    /// Closes one overlay, leaving the other untouched.
    OverlayDismissed(Overlay),
    /// Moves keyboard focus to an in-page anchor.
    AnchorNavigated(Anchor),
    /// Re-fetches the section catalog.
    CatalogReloaded,

    /// Moves the cursor (or scrolls the item overlay) down.
    KeyDown,
    /// Moves the cursor (or scrolls the item overlay) up.
    KeyUp,
    /// Opens whatever the cursor is on.
    Activate,
    NextFilter,
    PrevFilter,
    /// Toggles focus between the grid and the results panel.
    NextAnchor,
    /// Left click at a zero-based pane position.
    Click {
        line: usize,
        col: usize,
    },

    /// Starts editing the search query.
    FocusSearch,
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character from the search input.
    Backspace,
    /// Leaves typing mode, or closes the focused results panel.
    Escape,

    /// Counter animation timer fired.
    Tick,
    /// A request completed.
    Loaded(Response),
    /// Opens the external link of the loaded file item.
    OpenLink,
    /// Hides the plugin pane.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the shim's error path uniform.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Startup => {
            state.stats_generation += 1;
            let catalog = state.catalog.begin_load();
            tracing::info!("loading stats and catalog");
            Ok((
                true,
                vec![
                    Action::Fetch {
                        request: ApiRequest::Stats,
                        generation: state.stats_generation,
                    },
                    Action::Fetch {
                        request: ApiRequest::Sections,
                        generation: catalog,
                    },
                ],
            ))
        }
        Event::CatalogReloaded => {
            let generation = state.catalog.begin_load();
            tracing::debug!(generation, "reloading catalog");
            Ok((
                true,
                vec![Action::Fetch {
                    request: ApiRequest::Sections,
                    generation,
                }],
            ))
        }
        Event::FilterSelected(filter) => {
            tracing::debug!(filter = filter.label(), "filter selected");
            state.catalog.set_filter(filter.clone());
            state.anchor = Anchor::Sections;
            Ok((true, vec![]))
        }
        Event::NextFilter | Event::PrevFilter => {
            state.catalog.cycle_filter(*event == Event::NextFilter);
            Ok((true, vec![]))
        }
        Event::SectionOpened { id, name, icon } => {
            tracing::debug!(section = %id, "opening section");
            let (request, generation) = state.modals.section.open(id.clone(), name, icon);
            Ok((true, vec![Action::Fetch { request, generation }]))
        }
        Event::ItemOpened { section, item } => {
            tracing::debug!(section = %section, item = %item, "opening item");
            let (request, generation) = state.modals.item.open(section.clone(), item.clone());
            Ok((true, vec![Action::Fetch { request, generation }]))
        }
        Event::SearchSubmitted(query) => {
            state.input_mode = InputMode::Browse;
            match state.search.submit(query) {
                Submission::Closed => {
                    tracing::debug!("blank query, closing search");
                    state.anchor = Anchor::Sections;
                    Ok((true, vec![]))
                }
                Submission::Fetch(request, generation) => {
                    tracing::debug!(generation, "search submitted");
                    state.anchor = Anchor::Results;
                    Ok((true, vec![Action::Fetch { request, generation }]))
                }
            }
        }
        Event::OverlayDismissed(overlay) => {
            if state.modals.top().is_none() {
                return Ok((false, vec![]));
            }
            state.modals.close(*overlay);
            Ok((true, vec![]))
        }
        Event::AnchorNavigated(anchor) => {
            if *anchor == Anchor::Results && !state.search.is_visible() {
                return Ok((false, vec![]));
            }
            state.anchor = *anchor;
            Ok((true, vec![]))
        }
        Event::NextAnchor => {
            let anchor = state.anchor.next();
            handle_event(state, &Event::AnchorNavigated(anchor))
        }
        Event::KeyDown | Event::KeyUp => {
            let down = *event == Event::KeyDown;
            match state.modals.top() {
                Some(Overlay::Item) => {
                    state.modals.item.scroll_by(if down { 1 } else { -1 });
                    let max = state.max_item_scroll();
                    state.modals.item.clamp_scroll(max);
                }
                Some(Overlay::Section) if down => state.modals.section.move_down(),
                Some(Overlay::Section) => state.modals.section.move_up(),
                None if state.anchor == Anchor::Results => {
                    if down {
                        state.search.move_down();
                    } else {
                        state.search.move_up();
                    }
                }
                None if down => state.catalog.move_down(),
                None => state.catalog.move_up(),
            }
            Ok((true, vec![]))
        }
        Event::Activate => {
            let Some(command) = activation_command(state) else {
                return Ok((false, vec![]));
            };
            handle_event(state, &command)
        }
        Event::Click { line, col } => {
            let Some(command) = click_command(state, *line, *col) else {
                return Ok((false, vec![]));
            };
            handle_event(state, &command)
        }
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.search.push_char(*c);
            tracing::trace!(query = %state.search.input(), "search input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.search.backspace();
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.input_mode == InputMode::Typing {
                state.input_mode = InputMode::Browse;
                return Ok((true, vec![]));
            }
            if state.anchor == Anchor::Results && state.search.is_visible() {
                state.search.close();
                state.anchor = Anchor::Sections;
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::Tick => {
            let more = state.animator.tick();
            let actions = if more {
                vec![Action::ScheduleTick {
                    seconds: state.animator.interval_secs(),
                }]
            } else {
                vec![]
            };
            Ok((true, actions))
        }
        Event::Loaded(response) => Ok(apply_response(state, response)),
        Event::OpenLink => {
            let is_file = matches!(
                state.modals.item.state(),
                SurfaceState::Loaded(item) if classify(&item.content) == ContentKind::File
            );
            if !is_file {
                return Ok((false, vec![]));
            }
            Ok((
                false,
                vec![Action::OpenLink {
                    url: state.settings.file_link.clone(),
                }],
            ))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

fn apply_response(state: &mut AppState, response: &Response) -> (bool, Vec<Action>) {
    let generation = response.generation;

    let applied = match &response.payload {
        Payload::Stats(result) => {
            if generation != state.stats_generation {
                return (false, vec![]);
            }
            let Ok(stats) = result else {
                return (false, vec![]);
            };
            state.stats = Some(stats.clone());
            let settings = &state.settings;
            let needs_tick = state
                .animator
                .start(&stats.targets(), settings.counter_duration_ms, settings.counter_steps);
            let actions = if needs_tick {
                vec![Action::ScheduleTick {
                    seconds: state.animator.interval_secs(),
                }]
            } else {
                vec![]
            };
            return (true, actions);
        }
        Payload::Sections(result) => state.catalog.apply(generation, result.clone()),
        Payload::SectionDetail { section, items } => state.modals.section.apply(section, generation, items.clone()),
        Payload::Item { section, item, result } => state.modals.item.apply(section, item, generation, result.clone()),
        Payload::Search { query, results } => state.search.apply(query, generation, results.clone()),
    };

    if !applied {
        tracing::debug!(generation, "discarding stale response");
    }
    (applied, vec![])
}

/// Command for Enter in the current context.
fn activation_command(state: &AppState) -> Option<Event> {
    match state.modals.top() {
        Some(Overlay::Item) => None,
        Some(Overlay::Section) => {
            let section = state.modals.section.section()?.clone();
            let item = state.modals.section.selected()?;
            Some(Event::ItemOpened {
                section,
                item: item.id.clone(),
            })
        }
        None if state.anchor == Anchor::Results => {
            let result = state.search.selected()?;
            Some(Event::ItemOpened {
                section: result.section.clone(),
                item: result.item.id.clone(),
            })
        }
        None => {
            let section = state.catalog.selected()?;
            Some(Event::SectionOpened {
                id: section.id.clone(),
                name: section.name.clone(),
                icon: section.icon.clone(),
            })
        }
    }
}

/// Resolves a left click into a command, moving the relevant cursor first.
fn click_command(state: &mut AppState, line: usize, col: usize) -> Option<Event> {
    let layout = state.layout();

    match state.modals.top() {
        Some(Overlay::Item) => {
            (!layout.item_modal.contains(line, col)).then_some(Event::OverlayDismissed(Overlay::Item))
        }
        Some(Overlay::Section) => {
            let rect = layout.section_modal;
            if !rect.contains(line, col) {
                return Some(Event::OverlayDismissed(Overlay::Section));
            }
            let row = line.checked_sub(rect.content_top())?;
            if row >= rect.content_height() {
                return None;
            }
            let len = state.modals.section.state().loaded_len();
            let start = visible_window(state.modals.section.selected_index(), len, rect.content_height());
            let index = start + row;
            if index >= len {
                return None;
            }
            state.modals.section.select(index);
            activation_command(state)
        }
        None => {
            if line == FILTER_ROW {
                let options = state.catalog.filter_options();
                let labels: Vec<String> = options.iter().map(|option| sanitize(option.label())).collect();
                let hit = filter_spans(&labels)
                    .into_iter()
                    .position(|(start, end)| col >= start && col < end)?;
                return options.into_iter().nth(hit).map(Event::FilterSelected);
            }

            if layout.search_box().contains(line, col) {
                return Some(Event::FocusSearch);
            }

            if layout.grid.contains(line, col) {
                let len = state.catalog.visible().len();
                let start = visible_window(state.catalog.selected_index(), len, layout.grid.height);
                let index = start + (line - layout.grid.y);
                if index >= len {
                    return None;
                }
                state.catalog.select(index);
                state.anchor = Anchor::Sections;
                return activation_command(state);
            }

            let results = layout.results?;
            if results.contains(line, col) && line > results.y {
                let len = state.search.state().loaded_len();
                let start = visible_window(state.search.selected_index(), len, layout.results_rows());
                let index = start + (line - results.y - 1);
                if index >= len {
                    return None;
                }
                state.search.select(index);
                state.anchor = Anchor::Results;
                return activation_command(state);
            }

            None
        }
    }
}
