//! Zellij plugin entry point.
//!
//! The plugin only exists on the `wasm32-wasip1` target, where Zellij loads
//! it. Everything it does is delegated to the `image_finder` library; see
//! `plugin.rs` for the host wiring.
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search input, load more, modal, theme toggle
//! - `WebRequestResult` → `Event::FetchCompleted`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//! - `ModeUpdate` → `Event::SchemeChanged` when the palette flips between
//!   light and dark (only while `theme_mode` is `auto`)
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//! - `Ctrl+c`: Close plugin
//!
//! Gallery:
//! - `j`/`Down`, `k`/`Up`: Move cursor
//! - `/`: Edit search query
//! - `Enter`: Open image details
//! - `m` or `Space`: Load more results
//! - `t`: Toggle light/dark theme
//! - `q`/`Esc`: Close plugin
//!
//! Search bar:
//! - Printable keys: Type
//! - `Backspace`: Delete
//! - `Enter`: Search
//! - `Esc`: Cancel
//!
//! Image details:
//! - `Esc`/`q`/`Enter`: Close

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin;

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(plugin::State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("image-finder is a Zellij plugin; build it with `--target wasm32-wasip1` and load the .wasm from Zellij");
}
