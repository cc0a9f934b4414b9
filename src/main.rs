//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Maktaba library and the Zellij plugin
//! system: it translates Zellij events into library events and executes the
//! actions the library returns.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: `WebAccess` for the content service, `RunCommands` for
//!    the link opener
//! 3. **Startup**: Once granted, fetch stats and the section catalog
//! 4. **Update**: Map key, mouse, timer and web results to library events
//! 5. **Render**: Call the library render function
//!
//! # Web Requests
//!
//! Requests are issued with `web_request` and answered by a
//! `WebRequestResult` event carrying the same context map. The map identifies
//! the endpoint and generation token and carries the issuing span's trace
//! context, which is re-attached before the response is processed.
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Browsing:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `Enter`: Open section or result
//! - `h`/`Left`, `l`/`Right`: Previous / next category filter
//! - `/`: Edit search query
//! - `Tab`: Jump between sections and search results
//! - `r`: Reload sections
//! - `Esc`: Close focused search results
//! - `q`: Close plugin
//!
//! Typing a query:
//! - Characters edit the query, `Enter` submits, `Esc` stops typing
//!
//! Overlays:
//! - `j`/`k`: Move (section) or scroll (item)
//! - `Enter`: Open item (section overlay)
//! - `o`: Open the file link (item overlay)
//! - `Esc`/`q`: Close the top overlay

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use maktaba::app::{InputMode, Overlay};
use maktaba::loader::{RequestContext, Response, TraceContext};
use maktaba::{handle_event, Action, Config, Event};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the settings the shim needs to perform
/// side effects.
struct State {
    /// Core application state from library layer.
    app: maktaba::AppState,

    /// Base URL of the content service.
    api_url: String,

    /// Host command used to open external links.
    link_opener: String,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: maktaba::initialize(&config),
            api_url: config.api_url,
            link_opener: config.link_opener,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and state, requests
    /// permissions and subscribes to events.
    ///
    /// Nothing is fetched until web access is granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        maktaba::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, "parsed configuration");
        self.app = maktaba::initialize(&config);
        self.api_url.clone_from(&config.api_url);
        self.link_opener.clone_from(&config.link_opener);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, delegates to `handle_event`, and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        // Responses are traced under the span that issued the request, so
        // they bypass the generic update span.
        if let zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) = event {
            return self.handle_web_result(status, &body, &context);
        }

        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(Mouse::LeftClick(line, col)) => {
                let Ok(line) = usize::try_from(line) else {
                    return false;
                };
                Event::Click { line, col }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::Tick,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::info!("permissions granted - loading library");
                    Event::Startup
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - content service unreachable");
                    return false;
                }
            },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.viewport = maktaba::app::Viewport { rows, cols };
        maktaba::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs one library event and its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Decodes a web response and feeds it to the library.
    fn handle_web_result(&mut self, status: u16, body: &[u8], context: &BTreeMap<String, String>) -> bool {
        let Some(context) = RequestContext::from_map(context) else {
            tracing::debug!("ignoring web result without maktaba context");
            return false;
        };

        let _otel = context.trace.as_ref().and_then(TraceContext::attach);
        let span = tracing::debug_span!(
            "web_response",
            request = context.request.kind(),
            generation = context.generation,
            status
        );
        let _guard = span.entered();

        let response = Response::decode(status, body, &context);
        self.dispatch(&Event::Loaded(response))
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current context.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        if let Some(overlay) = self.app.modals.top() {
            return Self::map_overlay_key(overlay, key.bare_key);
        }

        match self.app.input_mode {
            InputMode::Typing => self.map_typing_key(key.bare_key),
            InputMode::Browse => Self::map_browse_key(key.bare_key),
        }
    }

    fn map_overlay_key(overlay: Overlay, key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter if overlay == Overlay::Section => Event::Activate,
            BareKey::Char('o') if overlay == Overlay::Item => Event::OpenLink,
            BareKey::Esc | BareKey::Char('q') => Event::OverlayDismissed(overlay),
            _ => return None,
        })
    }

    fn map_typing_key(&self, key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Enter => Event::SearchSubmitted(self.app.search.input().to_string()),
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_browse_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::Activate,
            BareKey::Left | BareKey::Char('h') => Event::PrevFilter,
            BareKey::Right | BareKey::Char('l') => Event::NextFilter,
            BareKey::Char('/') => Event::FocusSearch,
            BareKey::Tab => Event::NextAnchor,
            BareKey::Char('r') => Event::CatalogReloaded,
            BareKey::Esc => Event::Escape,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// - `Fetch`: issue a GET with the request context attached
    /// - `ScheduleTick`: arm the counter animation timer
    /// - `OpenLink`: run the link opener on the host
    /// - `CloseFocus`: hide the plugin pane
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::Fetch { request, generation } => {
                let context = RequestContext::new(request.clone(), *generation);
                let url = request.url(&self.api_url);
                tracing::debug!(url = %url, generation, "issuing request");
                web_request(url, HttpVerb::Get, BTreeMap::new(), Vec::new(), context.to_map());
            }
            Action::ScheduleTick { seconds } => {
                set_timeout(*seconds);
            }
            Action::OpenLink { url } => {
                tracing::debug!(url = %url, opener = %self.link_opener, "opening link");
                run_command(&[self.link_opener.as_str(), url.as_str()], BTreeMap::new());
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
