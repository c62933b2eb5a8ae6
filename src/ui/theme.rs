//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML colour palettes. The plugin keeps one light and one dark
//! theme in a [`ThemeSet`] and switches between them as the colour scheme
//! changes.
//!
//! # Built-in Themes
//!
//! - `catppuccin-latte`: Light theme with soft pastels (default light)
//! - `catppuccin-mocha`: Dark theme with warm tones (default dark)
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! info_fg = "#89b4fa"
//! loading_fg = "#fab387"
//! error_fg = "#f38ba8"
//! modal_border = "#cba6f7"
//! ```

use super::scheme::ThemeMode;
use crate::domain::{ImageFinderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default light theme name.
pub const DEFAULT_LIGHT_THEME: &str = "catppuccin-latte";

/// Default dark theme name.
pub const DEFAULT_DARK_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are hex strings (e.g., "#cdd6f4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Gallery cursor row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, column hints, and secondary modal text.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    /// Query-term highlight in tags.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Welcome and no-results messages.
    pub empty_state_fg: String,

    /// "Showing N results" line.
    pub info_fg: String,
    pub loading_fg: String,
    pub error_fg: String,

    pub modal_border: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is not one of the bundled themes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use image_finder::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ImageFinderError::Io`] if the file cannot be read and
    /// [`ImageFinderError::Theme`] if its contents do not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| ImageFinderError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default light theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name(DEFAULT_LIGHT_THEME)
            .expect("Built-in catppuccin-latte theme should always parse")
    }
}

/// A light and a dark theme, selected by [`ThemeMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSet {
    pub light: Theme,
    pub dark: Theme,
}

impl ThemeSet {
    #[must_use]
    pub const fn get(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

impl Default for ThemeSet {
    /// Catppuccin Latte for light mode, Catppuccin Mocha for dark mode.
    ///
    /// # Panics
    ///
    /// Panics if a built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self {
            light: Theme::default(),
            dark: Theme::from_name(DEFAULT_DARK_THEME)
                .expect("Built-in catppuccin-mocha theme should always parse"),
        }
    }
}
