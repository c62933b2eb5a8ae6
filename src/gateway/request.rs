//! Request construction for the image API.
//!
//! A request is fully described by a [`FetchRequest`]: the URL with every
//! query parameter applied, the headers, and a context map carrying the
//! [`FetchTag`] it was issued for. The plugin runtime hands the context back
//! unchanged with the response, which is how a late response is matched to the
//! query and page that asked for it.

use crate::domain::FetchError;
use std::collections::BTreeMap;
use url::Url;

/// Default Pixabay API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Number of images requested per page.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Smallest page size the API accepts.
pub const MIN_PER_PAGE: u32 = 3;

/// Largest page size the API accepts.
pub const MAX_PER_PAGE: u32 = 200;

const CONTEXT_GENERATION: &str = "image_finder.generation";
const CONTEXT_PAGE: &str = "image_finder.page";
const CONTEXT_QUERY: &str = "image_finder.query";

/// Request-time configuration for the image API.
///
/// All fields are fixed for the lifetime of the plugin; callers only supply
/// the query and page of each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Endpoint URL, without query parameters.
    pub base_url: String,
    /// API credential. Requests cannot be built without one.
    pub api_key: Option<String>,
    /// Images per page.
    pub per_page: u32,
    /// `image_type` filter (`photo`).
    pub image_type: String,
    /// `orientation` filter (`horizontal`).
    pub orientation: String,
    /// Whether safe search is enabled.
    pub safesearch: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            per_page: DEFAULT_PER_PAGE,
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safesearch: true,
        }
    }
}

/// Identifies one issued request by the query generation and page it belongs to.
///
/// The generation increases every time the query changes, so two tags with
/// the same query text but different generations are still distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTag {
    pub generation: u64,
    pub query: String,
    pub page: u32,
}

impl FetchTag {
    /// Encodes the tag into a request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_GENERATION.to_string(), self.generation.to_string()),
            (CONTEXT_PAGE.to_string(), self.page.to_string()),
            (CONTEXT_QUERY.to_string(), self.query.clone()),
        ])
    }

    /// Decodes a tag from a response context map.
    ///
    /// Returns `None` if any key is missing or malformed, which happens for
    /// responses to requests this plugin did not issue.
    ///
    /// # Examples
    ///
    /// ```
    /// use image_finder::gateway::FetchTag;
    ///
    /// let tag = FetchTag { generation: 3, query: "cats".into(), page: 2 };
    /// assert_eq!(FetchTag::from_context(&tag.to_context()), Some(tag));
    /// ```
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let generation = context.get(CONTEXT_GENERATION)?.parse().ok()?;
        let page = context.get(CONTEXT_PAGE)?.parse().ok()?;
        let query = context.get(CONTEXT_QUERY)?.clone();
        Some(Self {
            generation,
            query,
            page,
        })
    }
}

/// A single GET request ready to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub context: BTreeMap<String, String>,
}

/// Builds the request URL for `tag` under `config`.
///
/// # Errors
///
/// Returns [`FetchError::MissingApiKey`] if no key is configured and
/// [`FetchError::InvalidUrl`] if the base URL does not parse.
pub fn build_url(config: &GatewayConfig, tag: &FetchTag) -> Result<Url, FetchError> {
    let key = config
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(FetchError::MissingApiKey)?;

    let mut url =
        Url::parse(&config.base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    url.query_pairs_mut()
        .append_pair("key", key)
        .append_pair("q", &tag.query)
        .append_pair("page", &tag.page.to_string())
        .append_pair("image_type", &config.image_type)
        .append_pair("orientation", &config.orientation)
        .append_pair("per_page", &config.per_page.to_string())
        .append_pair("safesearch", if config.safesearch { "true" } else { "false" });

    Ok(url)
}
