//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use image_finder::ui::viewmodel::*;
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Image Finder ".into(), theme_label: " light ".into() },
//!     search_bar: SearchBarInfo { text: "cats".into(), editing: false },
//!     notices: vec![],
//!     gallery: vec![GalleryItem {
//!         position: 1,
//!         tags: "cat, kitten".into(),
//!         user: "someone".into(),
//!         is_selected: true,
//!         highlight_ranges: vec![(0, 3)],
//!     }],
//!     selected_index: 0,
//!     footer: FooterInfo { keybindings: "q: quit".into() },
//!     empty_state: None,
//!     modal: None,
//! };
//! assert_eq!(vm.gallery.len(), 1);
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// The search bar is always shown; it holds the draft while editing and
    /// the active query otherwise.
    pub search_bar: SearchBarInfo,

    /// Status lines between the search bar and the gallery, in display order.
    pub notices: Vec<Notice>,

    /// The visible window of result records.
    pub gallery: Vec<GalleryItem>,

    /// Index of the cursor row within `gallery`.
    pub selected_index: usize,

    pub footer: FooterInfo,

    /// Replaces the gallery when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Image details drawn over everything else.
    pub modal: Option<ModalInfo>,
}

/// One row in the gallery.
#[derive(Debug, Clone)]
pub struct GalleryItem {
    /// One-based position in the full result set.
    pub position: usize,

    /// Tag list, truncated to the column width.
    pub tags: String,

    pub user: String,

    pub is_selected: bool,

    /// Character ranges of `tags` matched by the query words.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// Active light/dark mode, shown at the right edge.
    pub theme_label: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub text: String,
    /// Whether the bar has input focus (draws a cursor).
    pub editing: bool,
}

/// Kind of status line, which picks its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Loading,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Image detail overlay.
#[derive(Debug, Clone)]
pub struct ModalInfo {
    pub title: String,
    /// `(label, value)` pairs in display order.
    pub lines: Vec<(String, String)>,
}
