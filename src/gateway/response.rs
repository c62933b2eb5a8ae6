//! Response decoding for the image API.

use crate::domain::{FetchError, ImageRecord};
use serde::Deserialize;

/// Longest slice of an error body kept in the user-facing message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// One page of normalized search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// Records in server order.
    pub records: Vec<ImageRecord>,
    /// Total matches reachable for the query. Zero when the API omits it.
    pub total_hits: u64,
}

#[derive(Debug, Deserialize)]
struct PixabayResponse {
    #[serde(rename = "totalHits", default)]
    total_hits: Option<u64>,
    hits: Vec<ImageRecord>,
}

/// Decodes a raw HTTP response into a [`SearchPage`].
///
/// Status `0` is how the host reports that no response was received at all.
///
/// # Errors
///
/// - [`FetchError::Transport`] for status `0`
/// - [`FetchError::Status`] for any other non-2xx status
/// - [`FetchError::Malformed`] when the body is not JSON or lacks the `hits` list
pub fn decode_response(status: u16, body: &[u8]) -> Result<SearchPage, FetchError> {
    if status == 0 {
        return Err(FetchError::Transport(body_text(body)));
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Status {
            status,
            message: body_text(body),
        });
    }

    let response: PixabayResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    Ok(SearchPage {
        records: response.hits,
        total_hits: response.total_hits.unwrap_or(0),
    })
}

fn body_text(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
