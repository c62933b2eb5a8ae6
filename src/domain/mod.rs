//! Domain layer for the Image Finder plugin.
//!
//! Core types that are independent of Zellij and of the rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Image record model

pub mod error;
pub mod image;

pub use error::{FetchError, ImageFinderError, Result};
pub use image::{ImageId, ImageRecord};
