//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a
//! `Vec<Action>` and the plugin shim executes each one in order, which keeps
//! every state transition testable without a host.
//!
//! # Example
//!
//! ```rust
//! use image_finder::app::Action;
//!
//! let actions = vec![Action::CloseFocus];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::gateway::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues one HTTP GET through the host's web request API.
    ///
    /// The response comes back later as a web request result event carrying
    /// the request's context map.
    Fetch(FetchRequest),
}
