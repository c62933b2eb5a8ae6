//! Application state and view model computation.
//!
//! [`AppState`] wraps the [`SearchState`] controller with everything the
//! plugin needs around it: the input mode and draft query for the search bar,
//! the gallery cursor, the light/dark theme pair, the gateway used to build
//! requests, and whether the host has granted web access.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns a state snapshot into a
//! [`UIViewModel`]: it windows the gallery around the cursor, computes
//! query-term highlight ranges in each record's tags, and picks the notices,
//! empty state, footer hints, and modal contents that apply.
//!
//! # Example
//!
//! ```rust
//! use image_finder::app::AppState;
//! use image_finder::gateway::PixabayGateway;
//! use image_finder::ui::ThemeSet;
//!
//! let state = AppState::new(PixabayGateway::default(), ThemeSet::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.empty_state.is_some());
//! ```

use super::modes::InputMode;
use super::search::SearchState;
use crate::domain::ImageRecord;
use crate::gateway::PixabayGateway;
use crate::ui::helpers::{tags_column_width, truncate, USER_COLUMN_WIDTH};
use crate::ui::scheme::{SchemePreference, ThemeMode};
use crate::ui::theme::{Theme, ThemeSet};
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, GalleryItem, HeaderInfo, ModalInfo, Notice, NoticeKind,
    SearchBarInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::BTreeSet;

/// Rows taken by everything except the gallery and notices: blank line,
/// header, border, search bar (3), column headers, border, footer.
const CHROME_ROWS: usize = 9;

/// Host permission state for outgoing web requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebAccess {
    /// Permission has been requested but not answered yet. Fetches wait.
    #[default]
    Pending,
    Granted,
    Denied,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The search controller. All result data lives here.
    pub search: SearchState,

    pub input_mode: InputMode,

    /// Text in the search bar while editing. Only submitted on enter.
    pub draft: String,

    /// Zero-based gallery cursor into `search.results()`.
    pub cursor: usize,

    pub themes: ThemeSet,

    /// Which half of `themes` is active.
    pub theme_mode: ThemeMode,

    /// Whether scheme change notifications may override `theme_mode`.
    pub scheme_preference: SchemePreference,

    pub gateway: PixabayGateway,

    pub web_access: WebAccess,
}

impl AppState {
    /// Creates an idle state with no query, following the system colour
    /// scheme and starting in light mode.
    #[must_use]
    pub fn new(gateway: PixabayGateway, themes: ThemeSet) -> Self {
        Self {
            search: SearchState::new(),
            input_mode: InputMode::Normal,
            draft: String::new(),
            cursor: 0,
            themes,
            theme_mode: ThemeMode::default(),
            scheme_preference: SchemePreference::Auto,
            gateway,
            web_access: WebAccess::Pending,
        }
    }

    /// Applies a colour scheme preference, pinning the mode if it is fixed.
    #[must_use]
    pub fn with_scheme_preference(mut self, preference: SchemePreference) -> Self {
        if let SchemePreference::Fixed(mode) = preference {
            self.theme_mode = mode;
        }
        self.scheme_preference = preference;
        self
    }

    /// The theme for the active mode.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        self.themes.get(self.theme_mode)
    }

    /// Moves the gallery cursor down by one position, wrapping to the top.
    pub fn move_cursor_down(&mut self) {
        let len = self.search.results().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the gallery cursor up by one position, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) {
        let len = self.search.results().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Keeps the cursor inside the current result set.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self
            .cursor
            .min(self.search.results().len().saturating_sub(1));
    }

    /// The record under the gallery cursor, if any.
    #[must_use]
    pub fn cursor_record(&self) -> Option<&ImageRecord> {
        self.search.results().get(self.cursor)
    }

    /// Computes a renderable UI view model for a `rows` x `cols` pane.
    ///
    /// # Windowing
    ///
    /// The gallery window is centred on the cursor and shifted back when it
    /// would run past the end of the result set, so the cursor is always
    /// visible and the window is as full as possible.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let notices = self.compute_notices();
        let available_rows = rows.saturating_sub(CHROME_ROWS + notices.len());
        let results = self.search.results();

        let mut visible_start = self.cursor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(results.len());
        if visible_end - visible_start < available_rows && results.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let tags_width = tags_column_width(cols);
        let matcher = SkimMatcherV2::default();

        let gallery: Vec<GalleryItem> = results
            .get(visible_start..visible_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(offset, record)| {
                self.compute_gallery_item(record, visible_start + offset, tags_width, &matcher)
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            notices,
            gallery,
            selected_index: self.cursor.saturating_sub(visible_start),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
            modal: self.compute_modal(),
        }
    }

    fn compute_gallery_item(
        &self,
        record: &ImageRecord,
        absolute_idx: usize,
        tags_width: usize,
        matcher: &SkimMatcherV2,
    ) -> GalleryItem {
        let tags = truncate(&record.tags, tags_width);
        let visible_chars = tags.chars().count();

        let highlight_ranges = highlight_ranges(&record.tags, self.search.query(), matcher)
            .into_iter()
            .filter(|&(start, _)| start < visible_chars)
            .map(|(start, end)| (start, end.min(visible_chars)))
            .collect();

        GalleryItem {
            position: absolute_idx + 1,
            tags,
            user: truncate(&record.user, USER_COLUMN_WIDTH),
            is_selected: absolute_idx == self.cursor,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: " Image Finder ".to_string(),
            theme_label: format!(" {} ", self.theme_mode),
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let editing = self.input_mode.is_editing();
        SearchBarInfo {
            text: if editing {
                self.draft.clone()
            } else {
                self.search.query().to_string()
            },
            editing,
        }
    }

    fn compute_notices(&self) -> Vec<Notice> {
        let mut notices = Vec::new();
        let count = self.search.results().len();

        if count > 0 {
            let total = self.search.total_hits().unwrap_or(count as u64);
            notices.push(Notice {
                kind: NoticeKind::Info,
                text: format!(
                    "Showing {count} of {total} results for \"{}\"",
                    self.search.query()
                ),
            });
        }

        if self.search.is_loading() {
            notices.push(Notice {
                kind: NoticeKind::Loading,
                text: format!("Loading page {}...", self.search.page()),
            });
        }

        if let Some(error) = self.search.error() {
            notices.push(Notice {
                kind: NoticeKind::Error,
                text: format!("Error: {error}"),
            });
        }

        notices
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if self.search.show_welcome() {
            return Some(EmptyState {
                message: "Search for images".to_string(),
                subtitle: "Press / to type a query, then Enter to search".to_string(),
            });
        }

        if self.search.show_no_results() {
            return Some(EmptyState {
                message: format!("No images found for \"{}\"", self.search.query()),
                subtitle: "Try a different search term".to_string(),
            });
        }

        None
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.search.selected_image().is_some() {
            "Esc/q/Enter: close".to_string()
        } else if self.input_mode.is_editing() {
            "Enter: search  Esc: cancel  Type to edit query".to_string()
        } else {
            let mut hints = vec!["j/k: navigate", "Enter: view", "/: search"];
            if self.search.can_retry() {
                hints.push("m: retry");
            } else if self.search.can_load_more() {
                hints.push("m: load more");
            }
            hints.extend(["t: theme", "q: quit"]);
            hints.join("  ")
        };

        FooterInfo { keybindings }
    }

    fn compute_modal(&self) -> Option<ModalInfo> {
        let record = self.search.selected_image()?;

        let mut lines = vec![("Author".to_string(), record.user.clone())];
        if !record.user_image_url.is_empty() {
            lines.push(("Avatar".to_string(), record.user_image_url.clone()));
        }
        lines.push(("Preview".to_string(), record.preview_url.clone()));
        lines.push(("Image".to_string(), record.large_image_url.clone()));
        if let Some(page_url) = &record.page_url {
            lines.push(("Page".to_string(), page_url.clone()));
        }
        if let Some(size) = record.dimensions() {
            lines.push(("Size".to_string(), size));
        }
        lines.push(("Tags".to_string(), record.tag_list().join(", ")));

        Some(ModalInfo {
            title: format!(" Image #{} ", record.id),
            lines,
        })
    }
}

/// Computes character ranges in `text` matched by the words of `query`.
///
/// Each whitespace-separated word is fuzzy matched on its own and the matched
/// positions are merged, so a query like `red car` highlights both words
/// wherever they appear in the tag list. Ranges are `(start, end)` character
/// indices with exclusive end, sorted and non-overlapping.
#[must_use]
pub fn highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let positions: BTreeSet<usize> = query
        .split_whitespace()
        .filter_map(|word| matcher.fuzzy_indices(text, word))
        .flat_map(|(_score, indices)| indices)
        .collect();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in positions {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SearchPage;

    fn state_with_results(count: u64) -> AppState {
        let mut state = AppState::new(PixabayGateway::default(), ThemeSet::default());
        state.search.submit_query("cat");
        let tag = state.search.next_fetch().unwrap();
        state.search.complete(
            &tag,
            Ok(SearchPage {
                records: (1..=count)
                    .map(|id| ImageRecord::sample(id, "cat, kitten, animal"))
                    .collect(),
                total_hits: 500,
            }),
        );
        state
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut state = state_with_results(3);
        state.move_cursor_up();
        assert_eq!(state.cursor, 2);
        state.move_cursor_down();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn cursor_moves_are_noops_without_results() {
        let mut state = AppState::new(PixabayGateway::default(), ThemeSet::default());
        state.move_cursor_down();
        state.move_cursor_up();
        assert_eq!(state.cursor, 0);
        assert!(state.cursor_record().is_none());
    }

    #[test]
    fn welcome_shown_before_first_search() {
        let state = AppState::new(PixabayGateway::default(), ThemeSet::default());
        let vm = state.compute_viewmodel(24, 80);

        assert_eq!(vm.empty_state.unwrap().message, "Search for images");
        assert!(vm.notices.is_empty());
        assert!(vm.gallery.is_empty());
        assert!(!vm.footer.keybindings.contains("load more"));
    }

    #[test]
    fn gallery_window_follows_cursor() {
        let mut state = state_with_results(40);
        state.cursor = 39;
        let vm = state.compute_viewmodel(24, 80);

        let rows = 24 - CHROME_ROWS - vm.notices.len();
        assert_eq!(vm.gallery.len(), rows);
        assert_eq!(vm.gallery.last().map(|item| item.position), Some(40));
        assert!(vm.gallery[vm.selected_index].is_selected);
    }

    #[test]
    fn info_notice_and_load_more_hint() {
        let state = state_with_results(12);
        let vm = state.compute_viewmodel(24, 80);

        assert_eq!(vm.notices.len(), 1);
        assert_eq!(vm.notices[0].kind, NoticeKind::Info);
        assert_eq!(vm.notices[0].text, "Showing 12 of 500 results for \"cat\"");
        assert!(vm.footer.keybindings.contains("m: load more"));
    }

    #[test]
    fn tags_are_highlighted_for_query_words() {
        let matcher = SkimMatcherV2::default();
        let ranges = highlight_ranges("cat, kitten, animal", "cat", &matcher);
        assert_eq!(ranges.first(), Some(&(0, 3)));
        assert!(highlight_ranges("cat", "", &matcher).is_empty());
    }

    #[test]
    fn modal_lists_record_details() {
        let mut state = state_with_results(3);
        state.search.select_image(2);
        let vm = state.compute_viewmodel(24, 80);

        let modal = vm.modal.unwrap();
        assert_eq!(modal.title, " Image #2 ");
        assert_eq!(modal.lines[0], ("Author".to_string(), "user2".to_string()));
        assert!(modal.lines.iter().any(|(label, value)| label == "Image"
            && value == "https://cdn.pixabay.com/photo/2_1280.jpg"));
        assert!(modal.lines.iter().any(|(label, value)| label == "Preview"
            && value == "https://cdn.pixabay.com/photo/2_640.jpg"));
        assert_eq!(vm.footer.keybindings, "Esc/q/Enter: close");
    }

    #[test]
    fn search_bar_shows_draft_while_editing() {
        let mut state = state_with_results(1);
        assert_eq!(state.compute_viewmodel(24, 80).search_bar.text, "cat");

        state.input_mode = InputMode::Search;
        state.draft = "do".to_string();
        let bar = state.compute_viewmodel(24, 80).search_bar;
        assert!(bar.editing);
        assert_eq!(bar.text, "do");
    }

    #[test]
    fn fixed_preference_pins_mode() {
        let state = AppState::new(PixabayGateway::default(), ThemeSet::default())
            .with_scheme_preference(SchemePreference::Fixed(ThemeMode::Dark));
        assert_eq!(state.theme_mode, ThemeMode::Dark);
        assert_eq!(state.theme().name, "catppuccin-mocha");
    }
}
