//! Zellij plugin state: translates host events into library events and
//! executes the actions the library returns.

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use image_finder::ui::scheme::{SchemeListener, SchemeSubscription};
use image_finder::{handle_event, Action, AppState, Config, Event, InputMode, SchemePreference, ThemeMode};

/// Colour-scheme listener backed by the host's `ModeUpdate` events, which
/// carry the current palette.
#[derive(Debug, Default)]
pub struct ModeUpdateListener;

impl SchemeListener for ModeUpdateListener {
    fn attach(&mut self) {
        subscribe(&[EventType::ModeUpdate]);
    }

    fn detach(&mut self) {
        unsubscribe(&[EventType::ModeUpdate]);
    }
}

pub struct State {
    app: AppState,

    /// Held while the theme follows the terminal. Dropping it unsubscribes.
    scheme: Option<SchemeSubscription<ModeUpdateListener>>,

    /// Last mode derived from the host palette. `ModeUpdate` fires on every
    /// input mode change, so only a different palette counts as a scheme
    /// change.
    detected_mode: Option<ThemeMode>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: image_finder::initialize(&Config::default()),
            scheme: None,
            detected_mode: None,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        image_finder::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();

        self.app = image_finder::initialize(&config);

        request_permission(&[PermissionType::WebAccess, PermissionType::ReadApplicationState]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        if config.scheme == SchemePreference::Auto {
            self.scheme = Some(SchemeSubscription::acquire(ModeUpdateListener));
        }

        tracing::debug!(follows_terminal = self.scheme.is_some(), "plugin loaded");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let _span = tracing::debug_span!("plugin_update", event_type = event_name(&event)).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Event::FetchCompleted {
                    context,
                    status,
                    body,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            zellij_tile::prelude::Event::ModeUpdate(ref mode_info) => {
                match self.detect_scheme_change(mode_info) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        image_finder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn execute_action(action: Action) {
        match action {
            Action::Fetch(request) => {
                tracing::debug!(url = %request.url, "issuing web request");
                web_request(
                    request.url,
                    HttpVerb::Get,
                    request.headers,
                    vec![],
                    request.context,
                );
            }
            Action::CloseFocus => hide_self(),
        }
    }

    /// Classifies the palette background and reports it only if it differs
    /// from the previous classification.
    fn detect_scheme_change(&mut self, mode_info: &ModeInfo) -> Option<Event> {
        let mode = match mode_info.style.colors.text_unselected.background {
            PaletteColor::Rgb((r, g, b)) => ThemeMode::from_background_rgb(r, g, b),
            PaletteColor::EightBit(index) => ThemeMode::from_background_index(index),
        };

        if self.detected_mode == Some(mode) {
            return None;
        }
        self.detected_mode = Some(mode);
        Some(Event::SchemeChanged(mode))
    }

    /// Maps keyboard input to application events.
    ///
    /// With the modal open only the close keys do anything. In the search bar
    /// every printable key is text.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('c') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        if self.app.search.selected_image().is_some() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseModal),
                _ => None,
            };
        }

        if self.app.input_mode == InputMode::Search {
            return match key.bare_key {
                BareKey::Enter => Some(Event::SubmitSearch),
                BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Enter => Event::OpenSelected,
            BareKey::Char('m' | ' ') => Event::LoadMore,
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }
}

fn event_name(event: &zellij_tile::prelude::Event) -> &'static str {
    match event {
        zellij_tile::prelude::Event::Key(_) => "Key",
        zellij_tile::prelude::Event::WebRequestResult(..) => "WebRequestResult",
        zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult",
        zellij_tile::prelude::Event::ModeUpdate(..) => "ModeUpdate",
        _ => "Other",
    }
}
