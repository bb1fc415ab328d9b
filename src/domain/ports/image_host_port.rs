//! Port for resolving hosted images.

use async_trait::async_trait;

use crate::domain::errors::LookupError;

/// Port for the image host API.
///
/// Ids are the normalized identifiers produced by the URL classifier.
/// `Ok(None)` means the host answered without a usable payload.
#[async_trait]
pub trait ImageHostPort: Send + Sync {
    /// Resolves a single hosted image to its direct URL.
    async fn fetch_image(&self, id: &str) -> Result<Option<String>, LookupError>;

    /// Resolves a gallery or album to its image URLs, in upstream order.
    async fn fetch_album(&self, id: &str) -> Result<Option<Vec<String>>, LookupError>;
}
