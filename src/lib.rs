//! Image Finder: a Zellij plugin for searching Pixabay photos.
//!
//! Type a query, get a paginated gallery of matching photos, load further
//! pages on demand, and open any result in a detail modal. The colours follow
//! the terminal's light/dark scheme.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Search state controller                          │
//! │  - Event handling / reactive fetch rule             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────┐               ┌───────────────────┐
//! │ UI Layer (ui/)    │               │ Gateway (gateway/)│
//! │ - Rendering       │               │ - URL building    │
//! │ - Themes          │               │ - Request tags    │
//! │ - Colour scheme   │               │ - JSON decoding   │
//! └───────────────────┘               └───────────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types, image records (domain/)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/image-finder.wasm" {
//!         api_key "YOUR_PIXABAY_KEY"
//!         per_page "12"
//!         theme_mode "auto"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! See [`Config::from_zellij`] for every option.
//!
//! # Example
//!
//! ```rust
//! use image_finder::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//!
//! state.draft = "mountain lake".to_string();
//! let (_, actions) = handle_event(&mut state, &Event::SubmitSearch)?;
//!
//! // No API key is configured, so the fetch fails before reaching the network.
//! assert!(actions.is_empty());
//! assert!(state.search.error().is_some());
//! # Ok::<(), image_finder::ImageFinderError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchState};
pub use domain::{FetchError, ImageFinderError, ImageRecord, Result};
pub use gateway::{GatewayConfig, PixabayGateway};
pub use ui::{SchemePreference, Theme, ThemeMode, ThemeSet};

use gateway::request::{MAX_PER_PAGE, MIN_PER_PAGE};
use infrastructure::expand_tilde;
use std::collections::BTreeMap;
use ui::theme::{DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME};

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/image-finder.wasm" {
///     api_key "YOUR_PIXABAY_KEY"
///     base_url "https://pixabay.com/api/"
///     per_page "24"
///     image_type "photo"
///     orientation "horizontal"
///     safesearch "true"
///     theme_mode "auto"
///     light_theme "catppuccin-latte"
///     dark_theme "catppuccin-mocha"
///     theme_file_dark "~/.config/zellij/image-finder-dark.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Request parameters for the image API.
    pub gateway: GatewayConfig,

    /// `auto` follows the terminal; `light` or `dark` pins the mode.
    pub scheme: SchemePreference,

    /// Built-in theme for light mode. Default: `catppuccin-latte`.
    pub light_theme: Option<String>,

    /// Built-in theme for dark mode. Default: `catppuccin-mocha`.
    pub dark_theme: Option<String>,

    /// TOML theme file for light mode. Takes precedence over `light_theme`.
    pub light_theme_file: Option<String>,

    /// TOML theme file for dark mode. Takes precedence over `dark_theme`.
    pub dark_theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored and unparsable values fall back to their
    /// defaults with a warning.
    ///
    /// # Parsing Rules
    ///
    /// - `api_key`, `base_url`, `image_type`, `orientation`: taken as-is when non-empty
    /// - `per_page`: integer clamped to 3..=200
    /// - `safesearch`: `true`/`false`
    /// - `theme_mode`: `auto`, `light`, or `dark`
    /// - `light_theme`, `dark_theme`: built-in theme names
    /// - `theme_file_light`, `theme_file_dark`: TOML file paths (`~` allowed)
    /// - `trace_level`: tracing filter directive
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use image_finder::{Config, SchemePreference, ThemeMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc123".to_string());
    /// map.insert("per_page".to_string(), "500".to_string());
    /// map.insert("theme_mode".to_string(), "dark".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.gateway.api_key.as_deref(), Some("abc123"));
    /// assert_eq!(config.gateway.per_page, 200);
    /// assert_eq!(config.scheme, SchemePreference::Fixed(ThemeMode::Dark));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let defaults = GatewayConfig::default();

        let per_page = text("per_page").map_or(defaults.per_page, |raw| {
            raw.parse::<u32>().map_or_else(
                |_| {
                    tracing::warn!(value = %raw, "invalid per_page, using default");
                    defaults.per_page
                },
                |n| n.clamp(MIN_PER_PAGE, MAX_PER_PAGE),
            )
        });

        let safesearch = text("safesearch").map_or(defaults.safesearch, |raw| {
            raw.parse::<bool>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid safesearch, using default");
                defaults.safesearch
            })
        });

        let scheme = text("theme_mode").map_or(SchemePreference::Auto, |raw| {
            raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "invalid theme_mode, following terminal");
                SchemePreference::Auto
            })
        });

        let gateway = GatewayConfig {
            base_url: text("base_url").unwrap_or(defaults.base_url),
            api_key: text("api_key"),
            per_page,
            image_type: text("image_type").unwrap_or(defaults.image_type),
            orientation: text("orientation").unwrap_or(defaults.orientation),
            safesearch,
        };

        Self {
            gateway,
            scheme,
            light_theme: text("light_theme"),
            dark_theme: text("dark_theme"),
            light_theme_file: text("theme_file_light"),
            dark_theme_file: text("theme_file_dark"),
            trace_level: text("trace_level"),
        }
    }
}

/// Builds the initial [`AppState`] for `config`.
///
/// Theme lookups that fail (unknown name, unreadable or invalid file) log a
/// warning and fall back to the default theme for that mode.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        has_api_key = config.gateway.api_key.is_some(),
        per_page = config.gateway.per_page,
        scheme = ?config.scheme,
        "initializing image finder"
    );

    let themes = ThemeSet {
        light: load_theme(
            config.light_theme_file.as_deref(),
            config.light_theme.as_deref(),
            DEFAULT_LIGHT_THEME,
        ),
        dark: load_theme(
            config.dark_theme_file.as_deref(),
            config.dark_theme.as_deref(),
            DEFAULT_DARK_THEME,
        ),
    };

    AppState::new(PixabayGateway::new(config.gateway.clone()), themes)
        .with_scheme_preference(config.scheme)
}

/// Resolves one half of the theme set: file, then built-in name, then default.
fn load_theme(file: Option<&str>, name: Option<&str>, default_name: &str) -> Theme {
    if let Some(file) = file {
        match Theme::from_file(expand_tilde(file)) {
            Ok(theme) => return theme,
            Err(e) => tracing::warn!(theme_file = %file, error = %e, "failed to load theme file, falling back"),
        }
    }

    if let Some(name) = name {
        if let Some(theme) = Theme::from_name(name) {
            return theme;
        }
        tracing::warn!(theme_name = %name, "unknown theme, falling back");
    }

    Theme::from_name(default_name).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.gateway, GatewayConfig::default());
        assert_eq!(config.scheme, SchemePreference::Auto);
        assert!(config.trace_level.is_none());
    }

    #[test]
    fn per_page_is_clamped_and_validated() {
        assert_eq!(Config::from_zellij(&map(&[("per_page", "1")])).gateway.per_page, 3);
        assert_eq!(Config::from_zellij(&map(&[("per_page", "40")])).gateway.per_page, 40);
        assert_eq!(
            Config::from_zellij(&map(&[("per_page", "many")])).gateway.per_page,
            GatewayConfig::default().per_page
        );
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_zellij(&map(&[("api_key", "  "), ("safesearch", "false")]));
        assert!(config.gateway.api_key.is_none());
        assert!(!config.gateway.safesearch);
    }

    #[test]
    fn invalid_theme_mode_follows_terminal() {
        let config = Config::from_zellij(&map(&[("theme_mode", "sepia")]));
        assert_eq!(config.scheme, SchemePreference::Auto);
    }

    #[test]
    fn initialize_resolves_named_themes() {
        let config = Config::from_zellij(&map(&[
            ("light_theme", "catppuccin-frappe"),
            ("dark_theme", "no-such-theme"),
            ("theme_mode", "light"),
        ]));
        let state = initialize(&config);

        assert_eq!(state.themes.light.name, "catppuccin-frappe");
        assert_eq!(state.themes.dark.name, DEFAULT_DARK_THEME);
        assert_eq!(state.theme_mode, ThemeMode::Light);
        assert_eq!(state.scheme_preference, SchemePreference::Fixed(ThemeMode::Light));
    }

    #[test]
    fn theme_file_takes_precedence() {
        let contents = include_str!("../themes/catppuccin-macchiato.toml")
            .replace("catppuccin-macchiato", "from-file");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = Config::from_zellij(&map(&[
            ("theme_file_dark", path.as_str()),
            ("dark_theme", "catppuccin-frappe"),
        ]));
        assert_eq!(initialize(&config).themes.dark.name, "from-file");
    }
}
