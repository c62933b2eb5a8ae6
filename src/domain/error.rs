//! Error types for the Image Finder plugin.
//!
//! Two error types live here. [`FetchError`] covers everything that can go
//! wrong with a single request to the image API; its `Display` output is the
//! message shown to the user. [`ImageFinderError`] is the crate-wide error for
//! configuration, theme loading, and filesystem problems, and wraps
//! [`FetchError`] for callers that want one error type.

use thiserror::Error;

/// Failure of one image API round trip.
///
/// Every variant renders a human-readable message. The search controller
/// stores that message verbatim as its error state, so wording here is
/// user-facing.
///
/// # Examples
///
/// ```
/// use image_finder::domain::FetchError;
///
/// let err = FetchError::Status { status: 429, message: "API rate limit exceeded".into() };
/// assert_eq!(err.to_string(), "request failed with status 429: API rate limit exceeded");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No API key was configured, so no request can be built.
    #[error("no Pixabay API key configured (set `api_key` in the plugin configuration)")]
    MissingApiKey,

    /// The configured base URL could not be parsed.
    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),

    /// The host reported that the request itself could not be carried out.
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status code.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text, trimmed.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response from image API: {0}")]
    Malformed(String),

    /// Web access permission was not granted by the user.
    #[error("web access permission was denied")]
    PermissionDenied,
}

/// The main error type for Image Finder operations.
#[derive(Debug, Error)]
pub enum ImageFinderError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// An image API request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// A specialized `Result` type for Image Finder operations.
pub type Result<T> = std::result::Result<T, ImageFinderError>;
