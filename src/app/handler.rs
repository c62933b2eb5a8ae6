//! Event handling and state transition logic.
//!
//! The handler follows a unidirectional data flow:
//! 1. Events arrive from the plugin runtime (keys, web responses, host
//!    notifications)
//! 2. [`handle_event`] pattern-matches the event and mutates [`AppState`]
//! 3. The reactive fetch rule runs once: if the (query, page) pair changed,
//!    the new fetch becomes an [`Action::Fetch`]
//! 4. Actions are returned for the runtime to execute
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Search input**: `SearchMode`, `Char`, `Backspace`, `SubmitSearch`, `ExitSearch`
//! - **Results**: `LoadMore`, `OpenSelected`, `CloseModal`
//! - **Appearance**: `ToggleTheme`, `SchemeChanged`
//! - **Host**: `FetchCompleted`, `PermissionsResult`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use image_finder::app::{handle_event, AppState, Event};
//! use image_finder::gateway::PixabayGateway;
//! use image_finder::ui::ThemeSet;
//!
//! let mut state = AppState::new(PixabayGateway::default(), ThemeSet::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(actions.is_empty());
//! # let _ = should_render;
//! # Ok::<(), image_finder::ImageFinderError>(())
//! ```

use super::modes::InputMode;
use super::search::Completion;
use super::state::WebAccess;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::FetchError;
use crate::gateway::FetchTag;
use crate::ui::scheme::{SchemePreference, ThemeMode};
use std::collections::BTreeMap;

/// Events triggered by user input or the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the gallery cursor down (wraps to top).
    KeyDown,
    /// Moves the gallery cursor up (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Focuses the search bar, prefilled with the active query.
    SearchMode,
    /// Appends a character to the draft query.
    Char(char),
    /// Removes the last character of the draft query.
    Backspace,
    /// Submits the draft query.
    SubmitSearch,
    /// Leaves the search bar without submitting.
    ExitSearch,

    /// Requests the next page of the current query.
    LoadMore,
    /// Opens the modal on the record under the cursor.
    OpenSelected,
    CloseModal,

    /// Flips between the light and dark theme.
    ToggleTheme,
    /// The host's colour scheme changed.
    SchemeChanged(ThemeMode),

    /// A web request issued by an [`Action::Fetch`] finished.
    FetchCompleted {
        /// Context map the request was issued with.
        context: BTreeMap<String, String>,
        /// HTTP status, or 0 when the request never reached a server.
        status: u16,
        body: Vec<u8>,
    },

    /// The host answered the permission request.
    PermissionsResult {
        granted: bool,
    },
}

impl Event {
    /// Short name for logging. Response bodies are too large for span fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::CloseFocus => "close_focus",
            Self::SearchMode => "search_mode",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::SubmitSearch => "submit_search",
            Self::ExitSearch => "exit_search",
            Self::LoadMore => "load_more",
            Self::OpenSelected => "open_selected",
            Self::CloseModal => "close_modal",
            Self::ToggleTheme => "toggle_theme",
            Self::SchemeChanged(_) => "scheme_changed",
            Self::FetchCompleted { .. } => "fetch_completed",
            Self::PermissionsResult { .. } => "permissions_result",
        }
    }
}

/// Processes an event, mutates application state, and returns whether to
/// re-render along with the actions to execute.
///
/// # Errors
///
/// Reserved for failures the runtime must hear about. Fetch failures are not
/// errors here: they are delivered to the search state and shown to the user.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    let mut actions = Vec::new();

    let should_render = match event {
        Event::KeyDown => {
            state.move_cursor_down();
            true
        }
        Event::KeyUp => {
            state.move_cursor_up();
            true
        }
        Event::CloseFocus => {
            actions.push(Action::CloseFocus);
            false
        }
        Event::SearchMode => {
            state.input_mode = InputMode::Search;
            state.draft = state.search.query().to_string();
            true
        }
        Event::Char(c) => {
            if !state.input_mode.is_editing() {
                return Ok((false, vec![]));
            }
            state.draft.push(*c);
            true
        }
        Event::Backspace => {
            if !state.input_mode.is_editing() {
                return Ok((false, vec![]));
            }
            state.draft.pop();
            true
        }
        Event::SubmitSearch => {
            state.input_mode = InputMode::Normal;
            if state.search.submit_query(&state.draft) {
                state.cursor = 0;
            }
            true
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            state.draft.clear();
            true
        }
        Event::LoadMore => {
            if !state.search.can_load_more() && !state.search.can_retry() {
                tracing::debug!(
                    loaded = state.search.results().len(),
                    total_hits = ?state.search.total_hits(),
                    "load more not available"
                );
                return Ok((false, vec![]));
            }
            state.search.load_more()
        }
        Event::OpenSelected => {
            let Some(id) = state.cursor_record().map(|r| r.id) else {
                tracing::debug!("no record under cursor");
                return Ok((false, vec![]));
            };
            state.search.select_image(id)
        }
        Event::CloseModal => {
            state.search.deselect();
            true
        }
        Event::ToggleTheme => {
            state.theme_mode = state.theme_mode.toggled();
            tracing::debug!(mode = %state.theme_mode, "theme toggled");
            true
        }
        Event::SchemeChanged(mode) => {
            if matches!(state.scheme_preference, SchemePreference::Fixed(_)) {
                return Ok((false, vec![]));
            }
            let changed = state.theme_mode != *mode;
            if changed {
                tracing::debug!(from = %state.theme_mode, to = %mode, "colour scheme changed");
            }
            state.theme_mode = *mode;
            changed
        }
        Event::FetchCompleted {
            context,
            status,
            body,
        } => {
            let Some(tag) = FetchTag::from_context(context) else {
                tracing::warn!(status, "web response without a search tag, ignoring");
                return Ok((false, vec![]));
            };

            let outcome = state.gateway.decode(*status, body);
            let completion = state.search.complete(&tag, outcome);
            state.clamp_cursor();

            completion != Completion::Stale
        }
        Event::PermissionsResult { granted } => {
            state.web_access = if *granted {
                WebAccess::Granted
            } else {
                WebAccess::Denied
            };
            tracing::debug!(granted, "web access permission answered");
            true
        }
    };

    dispatch_fetch(state, &mut actions);

    Ok((should_render, actions))
}

/// Runs the reactive fetch rule once and turns its result into an action.
///
/// While the permission answer is pending nothing is dispatched; the rule
/// runs again after the answer arrives and picks up the current pair. Fetches
/// that cannot be issued at all fail immediately through the search state.
fn dispatch_fetch(state: &mut AppState, actions: &mut Vec<Action>) {
    if state.web_access == WebAccess::Pending {
        return;
    }

    let Some(tag) = state.search.next_fetch() else {
        return;
    };

    if state.web_access == WebAccess::Denied {
        state.search.complete(&tag, Err(FetchError::PermissionDenied));
        return;
    }

    match state.gateway.request(&tag) {
        Ok(request) => actions.push(Action::Fetch(request)),
        Err(e) => {
            tracing::warn!(error = %e, "could not build image search request");
            state.search.complete(&tag, Err(e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{FetchRequest, GatewayConfig, PixabayGateway};
    use crate::ui::ThemeSet;

    fn granted_state() -> AppState {
        let gateway = PixabayGateway::new(GatewayConfig {
            api_key: Some("test-key".to_string()),
            ..GatewayConfig::default()
        });
        let mut state = AppState::new(gateway, ThemeSet::default());
        handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        state
    }

    fn submit(state: &mut AppState, query: &str) -> Vec<Action> {
        handle_event(state, &Event::SearchMode).unwrap();
        state.draft = query.to_string();
        handle_event(state, &Event::SubmitSearch).unwrap().1
    }

    fn only_fetch(actions: Vec<Action>) -> FetchRequest {
        match actions.as_slice() {
            [Action::Fetch(request)] => request.clone(),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, request: &FetchRequest, ids: std::ops::Range<u64>, total: u64) -> bool {
        let hits: Vec<String> = ids
            .map(|id| {
                format!(
                    r#"{{"id":{id},"webformatURL":"p{id}","largeImageURL":"l{id}","tags":"cat, kitten","user":"u{id}","userImageURL":""}}"#
                )
            })
            .collect();
        let body = format!(r#"{{"total":{total},"totalHits":{total},"hits":[{}]}}"#, hits.join(","));
        handle_event(
            state,
            &Event::FetchCompleted {
                context: request.context.clone(),
                status: 200,
                body: body.into_bytes(),
            },
        )
        .unwrap()
        .0
    }

    #[test]
    fn typing_edits_only_the_draft() {
        let mut state = granted_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        for c in "cats".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::Backspace).unwrap();

        assert_eq!(state.draft, "cat");
        assert_eq!(state.search.query(), "");
        assert!(state.search.next_fetch().is_none());
    }

    #[test]
    fn chars_outside_search_mode_are_ignored() {
        let mut state = granted_state();
        let (render, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.draft.is_empty());
    }

    #[test]
    fn submit_issues_exactly_one_fetch() {
        let mut state = granted_state();
        let request = only_fetch(submit(&mut state, "cats"));

        assert!(request.url.contains("q=cats"));
        assert!(request.url.contains("page=1"));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.search.is_loading());

        let (_, again) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn resubmitting_same_query_is_silent() {
        let mut state = granted_state();
        let request = only_fetch(submit(&mut state, "cats"));
        respond(&mut state, &request, 1..13, 100);

        assert!(submit(&mut state, "cats").is_empty());
        assert_eq!(state.search.results().len(), 12);
    }

    #[test]
    fn load_more_appends_next_page() {
        let mut state = granted_state();
        let first = only_fetch(submit(&mut state, "cats"));
        respond(&mut state, &first, 1..13, 100);

        let second = only_fetch(handle_event(&mut state, &Event::LoadMore).unwrap().1);
        assert!(second.url.contains("page=2"));
        respond(&mut state, &second, 13..25, 100);

        assert_eq!(state.search.results().len(), 24);
        assert!(state.search.can_load_more());
    }

    #[test]
    fn load_more_is_ignored_when_exhausted() {
        let mut state = granted_state();
        let request = only_fetch(submit(&mut state, "cats"));
        respond(&mut state, &request, 1..6, 5);

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.search.page(), 1);
    }

    #[test]
    fn load_more_retries_a_failed_first_page() {
        let mut state = granted_state();
        let request = only_fetch(submit(&mut state, "cats"));
        handle_event(
            &mut state,
            &Event::FetchCompleted {
                context: request.context.clone(),
                status: 503,
                body: b"unavailable".to_vec(),
            },
        )
        .unwrap();
        assert!(state.search.error().is_some());
        assert!(!state.search.can_load_more());

        let retry = only_fetch(handle_event(&mut state, &Event::LoadMore).unwrap().1);
        assert!(retry.url.contains("&page=1"));

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        respond(&mut state, &retry, 1..13, 100);
        assert!(state.search.error().is_none());
        assert_eq!(state.search.results().len(), 12);
    }

    #[test]
    fn stale_response_does_not_render() {
        let mut state = granted_state();
        let cats = only_fetch(submit(&mut state, "cats"));
        let dogs = only_fetch(submit(&mut state, "dogs"));

        assert!(!respond(&mut state, &cats, 1..13, 100));
        assert!(state.search.results().is_empty());

        assert!(respond(&mut state, &dogs, 50..62, 100));
        assert_eq!(state.search.results()[0].id, 50);
    }

    #[test]
    fn new_query_resets_cursor() {
        let mut state = granted_state();
        let request = only_fetch(submit(&mut state, "cats"));
        respond(&mut state, &request, 1..13, 100);
        handle_event(&mut state, &Event::KeyUp).unwrap();
        assert_eq!(state.cursor, 11);

        submit(&mut state, "dogs");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn missing_api_key_surfaces_as_error() {
        let mut state = AppState::new(PixabayGateway::default(), ThemeSet::default());
        handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();

        let actions = submit(&mut state, "cats");
        assert!(actions.is_empty());
        assert_eq!(state.search.error(), Some(FetchError::MissingApiKey.to_string().as_str()));
        assert!(!state.search.is_loading());
    }

    #[test]
    fn http_error_is_stored() {
        let mut state = granted_state();
        let request = only_fetch(submit(&mut state, "cats"));

        handle_event(
            &mut state,
            &Event::FetchCompleted {
                context: request.context,
                status: 429,
                body: b"API rate limit exceeded".to_vec(),
            },
        )
        .unwrap();

        assert_eq!(
            state.search.error(),
            Some("request failed with status 429: API rate limit exceeded")
        );
    }

    #[test]
    fn fetches_wait_for_permission() {
        let gateway = PixabayGateway::new(GatewayConfig {
            api_key: Some("k".to_string()),
            ..GatewayConfig::default()
        });
        let mut state = AppState::new(gateway, ThemeSet::default());

        assert!(submit(&mut state, "cats").is_empty());
        let (_, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert!(only_fetch(actions).url.contains("q=cats"));
    }

    #[test]
    fn denied_permission_fails_fetches() {
        let mut state = AppState::new(PixabayGateway::default(), ThemeSet::default());
        handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();

        assert!(submit(&mut state, "cats").is_empty());
        assert_eq!(state.search.error(), Some("web access permission was denied"));
    }

    #[test]
    fn modal_opens_on_cursor_record() {
        let mut state = granted_state();
        let request = only_fetch(submit(&mut state, "cats"));
        respond(&mut state, &request, 1..4, 3);

        handle_event(&mut state, &Event::KeyDown).unwrap();
        handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert_eq!(state.search.selected_image().map(|r| r.id), Some(2));

        handle_event(&mut state, &Event::CloseModal).unwrap();
        assert!(state.search.selected_image().is_none());
    }

    #[test]
    fn scheme_changes_follow_host_unless_pinned() {
        let mut state = granted_state();
        handle_event(&mut state, &Event::SchemeChanged(ThemeMode::Dark)).unwrap();
        assert_eq!(state.theme_mode, ThemeMode::Dark);

        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.theme_mode, ThemeMode::Light);

        state.scheme_preference = SchemePreference::Fixed(ThemeMode::Light);
        let (render, _) = handle_event(&mut state, &Event::SchemeChanged(ThemeMode::Dark)).unwrap();
        assert!(!render);
        assert_eq!(state.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = granted_state();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
