//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Text measurement, truncation, and highlighting
//! - [`theme`]: Colour themes and ANSI escape sequence generation
//! - [`scheme`]: Light/dark mode and the scoped colour-scheme subscription

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod scheme;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use scheme::{SchemeListener, SchemePreference, SchemeSubscription, ThemeMode};
pub use theme::{Theme, ThemeSet};
pub use viewmodel::{
    EmptyState, FooterInfo, GalleryItem, HeaderInfo, ModalInfo, Notice, NoticeKind,
    SearchBarInfo, UIViewModel,
};
