//! Image record domain model.
//!
//! An [`ImageRecord`] is one search hit as returned by the image API. Records
//! are immutable once received: the controller only appends them to its result
//! set and hands out shared references.

use serde::{Deserialize, Serialize};

/// Unique image identifier assigned by the image API.
pub type ImageId = u64;

/// One image returned by a search.
///
/// Field names follow the Pixabay wire format through `serde` renames so that
/// a hit deserializes directly into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: ImageId,

    /// Medium-size preview used in the gallery.
    #[serde(rename = "webformatURL")]
    pub preview_url: String,

    /// Full-size image shown in the modal.
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,

    /// Comma-separated descriptive tags.
    #[serde(default)]
    pub tags: String,

    /// Name of the uploading user.
    #[serde(default)]
    pub user: String,

    /// Avatar URL of the uploading user. Empty when the user has none.
    #[serde(rename = "userImageURL", default)]
    pub user_image_url: String,

    /// Pixabay page for the image.
    #[serde(rename = "pageURL", default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,

    #[serde(rename = "imageWidth", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(rename = "imageHeight", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ImageRecord {
    /// Splits the tag string into individual trimmed tags.
    ///
    /// # Examples
    ///
    /// ```
    /// # use image_finder::domain::ImageRecord;
    /// # let record = ImageRecord::sample(1, "cat, animal,  pet");
    /// assert_eq!(record.tag_list(), vec!["cat", "animal", "pet"]);
    /// ```
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Formats the original image size as `WIDTHxHEIGHT`, if known.
    #[must_use]
    pub fn dimensions(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(format!("{w}x{h}")),
            _ => None,
        }
    }

    /// Builds a record with placeholder URLs. Used by doc examples and tests.
    #[doc(hidden)]
    #[must_use]
    pub fn sample(id: ImageId, tags: &str) -> Self {
        Self {
            id,
            preview_url: format!("https://cdn.pixabay.com/photo/{id}_640.jpg"),
            large_image_url: format!("https://cdn.pixabay.com/photo/{id}_1280.jpg"),
            tags: tags.to_string(),
            user: format!("user{id}"),
            user_image_url: String::new(),
            page_url: None,
            width: None,
            height: None,
        }
    }
}
