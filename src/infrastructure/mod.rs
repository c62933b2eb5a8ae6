//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Inside the sandbox the plugin's own data directory is mounted at `/data`
//! and the host filesystem (rooted at the directory Zellij was started from)
//! at `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
