use serde::Deserialize;

/// `/image/{id}` response.
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    pub data: Option<ImageData>,
}

#[derive(Debug, Deserialize)]
pub struct ImageData {
    pub link: Option<String>,
}

/// `/gallery/{id}` and `/album/{id}` response.
///
/// A gallery entry is either a single image (carries `link`) or an album
/// (carries `images`); both collapse to an ordered list of links. An album's
/// `link` is its web page, never an image.
#[derive(Debug, Deserialize)]
pub struct GalleryResponse {
    pub data: Option<GalleryData>,
}

#[derive(Debug, Deserialize)]
pub struct GalleryData {
    pub link: Option<String>,
    #[serde(default)]
    pub is_album: bool,
    pub images: Option<Vec<ImageData>>,
}

impl GalleryData {
    #[must_use]
    pub fn into_links(self) -> Vec<String> {
        match self.images {
            Some(images) => images.into_iter().filter_map(|image| image.link).collect(),
            None if self.is_album => Vec::new(),
            None => self.link.into_iter().collect(),
        }
    }
}

/// Imgur error body.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub data: Option<ErrorData>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorData {
    #[serde(default)]
    pub error: serde_json::Value,
}

impl ErrorResponse {
    /// Best-effort error text; imgur sends either a string or an object here.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.data.as_ref().map(|d| &d.error)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
