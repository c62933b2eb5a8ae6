//! Image fetch gateway for the Pixabay search API.
//!
//! The gateway is the boundary between the search controller and the network.
//! Because the plugin runs inside Zellij's single-threaded WASM sandbox, one
//! round trip is split into two halves:
//!
//! ```text
//! PixabayGateway::request(tag) ──► Action::Fetch ──► web_request (host)
//!                                                          │
//! SearchState::complete(tag, _) ◄── PixabayGateway::decode ◄┘ WebRequestResult
//! ```
//!
//! Each call produces exactly one GET. The gateway never retries, caches, or
//! batches requests.
//!
//! # Modules
//!
//! - [`request`]: Configuration, request tags, and URL construction
//! - [`response`]: Response decoding into [`SearchPage`]

pub mod request;
pub mod response;

pub use request::{FetchRequest, FetchTag, GatewayConfig};
pub use response::{decode_response, SearchPage};

use crate::domain::FetchError;
use std::collections::BTreeMap;

/// Pixabay implementation of the image fetch gateway.
#[derive(Debug, Clone, Default)]
pub struct PixabayGateway {
    config: GatewayConfig,
}

impl PixabayGateway {
    #[must_use]
    pub const fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Builds the single GET request for `tag`.
    ///
    /// # Errors
    ///
    /// Fails without touching the network when no API key is configured or
    /// the base URL is invalid.
    pub fn request(&self, tag: &FetchTag) -> Result<FetchRequest, FetchError> {
        let url = request::build_url(&self.config, tag)?;

        tracing::debug!(
            query = %tag.query,
            page = tag.page,
            generation = tag.generation,
            per_page = self.config.per_page,
            "built image search request"
        );

        let headers = BTreeMap::from([("Accept".to_string(), "application/json".to_string())]);

        Ok(FetchRequest {
            url: url.into(),
            headers,
            context: tag.to_context(),
        })
    }

    /// Decodes the response to a request previously built by [`Self::request`].
    ///
    /// # Errors
    ///
    /// See [`decode_response`].
    pub fn decode(&self, status: u16, body: &[u8]) -> Result<SearchPage, FetchError> {
        let result = decode_response(status, body);
        match &result {
            Ok(page) => tracing::debug!(
                status,
                records = page.records.len(),
                total_hits = page.total_hits,
                "decoded image search response"
            ),
            Err(e) => tracing::debug!(status, error = %e, "image search request failed"),
        }
        result
    }
}
