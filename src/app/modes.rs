//! Input mode state for the application.
//!
//! The plugin is either navigating the gallery or editing the search bar.
//! The modal is not a mode of its own: it is open exactly when the search
//! state holds a selected image.
//!
//! # Example
//!
//! ```rust
//! use image_finder::app::InputMode;
//!
//! let mode = InputMode::Search;
//! assert!(mode.is_editing());
//! ```

/// Current input handling mode.
///
/// Controls which keybindings are active and whether the search bar shows the
/// draft text with a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Gallery navigation and commands.
    ///
    /// Available keybindings: j/k (navigate), / (search), enter (open image),
    /// m (load more), t (toggle theme), q (quit).
    #[default]
    Normal,

    /// Typing into the search bar.
    ///
    /// Characters edit the draft query, enter submits it, esc cancels.
    Search,
}

impl InputMode {
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Search)
    }
}
