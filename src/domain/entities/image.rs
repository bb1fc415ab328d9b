//! Image entities discovered from the feed.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use super::PostRecord;
use crate::domain::errors::ImageError;

/// Unique identifier for an image entity.
/// Mirrors the upstream post identity, so it is unique within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageId(pub String);

impl ImageId {
    /// Creates a new `ImageId` from any string-like input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Default)]
struct ResolvedUrls {
    urls: Vec<String>,
    revision: u32,
}

/// One discovered item and its (possibly still unresolved) image URLs.
///
/// Entities are shared between the collection and in-flight lookups, so the
/// URL list lives behind its own lock. No lock is ever shared between entities.
#[derive(Debug)]
pub struct ImageEntity {
    id: ImageId,
    title: String,
    source_group: String,
    is_sensitive: bool,
    thumbnail: Option<String>,
    resolved: RwLock<ResolvedUrls>,
}

/// Entity handle shared by the collection, observers and pending lookups.
pub type SharedImage = Arc<ImageEntity>;

impl ImageEntity {
    /// Creates an unresolved entity.
    #[must_use]
    pub fn new(
        id: impl Into<ImageId>,
        title: impl Into<String>,
        source_group: impl Into<String>,
        is_sensitive: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source_group: source_group.into(),
            is_sensitive,
            thumbnail: None,
            resolved: RwLock::new(ResolvedUrls::default()),
        }
    }

    /// Creates an unresolved entity carrying the post's metadata.
    #[must_use]
    pub fn from_post(post: &PostRecord) -> Self {
        let mut entity = Self::new(
            post.id(),
            post.title(),
            post.source_group(),
            post.is_sensitive(),
        );
        entity.thumbnail = post.thumbnail().map(str::to_owned);
        entity
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> &ImageId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn source_group(&self) -> &str {
        &self.source_group
    }

    #[must_use]
    pub const fn is_sensitive(&self) -> bool {
        self.is_sensitive
    }

    /// Replaces the URL list with a single URL.
    pub fn set_single_url(&self, url: impl Into<String>) {
        self.set_urls(vec![url.into()]);
    }

    /// Replaces the URL list wholesale, keeping the given order.
    pub fn set_urls(&self, urls: Vec<String>) {
        let mut resolved = self.resolved.write();
        resolved.urls = urls;
        resolved.revision = resolved.revision.saturating_add(1);
    }

    /// Returns the first resolved URL.
    ///
    /// # Errors
    /// Returns `ImageError::EmptyResult` if nothing has been resolved yet.
    /// Callers are expected to check [`Self::url_count`] first.
    pub fn representative_url(&self) -> Result<String, ImageError> {
        self.resolved
            .read()
            .urls
            .first()
            .cloned()
            .ok_or_else(|| ImageError::empty_result(self.id.clone()))
    }

    /// Thumbnail to display: the upstream thumbnail when it is a real URL,
    /// otherwise the representative URL.
    #[must_use]
    pub fn thumbnail_url(&self) -> Option<String> {
        self.thumbnail
            .as_deref()
            .filter(|t| t.starts_with("http://") || t.starts_with("https://"))
            .map(str::to_owned)
            .or_else(|| self.representative_url().ok())
    }

    #[must_use]
    pub fn url_count(&self) -> usize {
        self.resolved.read().urls.len()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.url_count() > 0
    }

    /// Returns a copy of all resolved URLs.
    #[must_use]
    pub fn all_urls(&self) -> Vec<String> {
        self.resolved.read().urls.clone()
    }

    /// Number of URL writes applied so far.
    #[must_use]
    pub fn revision(&self) -> u32 {
        self.resolved.read().revision
    }
}

/// Serializable point-in-time view of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSnapshot {
    pub id: ImageId,
    pub title: String,
    pub source_group: String,
    pub is_sensitive: bool,
    pub thumbnail_url: Option<String>,
    pub urls: Vec<String>,
}

impl From<&ImageEntity> for ImageSnapshot {
    fn from(entity: &ImageEntity) -> Self {
        Self {
            id: entity.id.clone(),
            title: entity.title.clone(),
            source_group: entity.source_group.clone(),
            is_sensitive: entity.is_sensitive,
            thumbnail_url: entity.thumbnail_url(),
            urls: entity.all_urls(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> ImageEntity {
        ImageEntity::new("t3_1", "title", "gifs", false)
    }

    #[test]
    fn test_new_entity_is_unresolved() {
        let image = entity();

        assert_eq!(image.url_count(), 0);
        assert!(!image.is_resolved());
        assert_eq!(image.revision(), 0);
        assert!(matches!(
            image.representative_url(),
            Err(ImageError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_set_single_url_replaces_list() {
        let image = entity();
        image.set_urls(vec!["a".to_string(), "b".to_string()]);
        image.set_single_url("c");

        assert_eq!(image.all_urls(), vec!["c".to_string()]);
        assert_eq!(image.revision(), 2);
    }

    #[test]
    fn test_set_urls_preserves_order() {
        let image = entity();
        image.set_urls(vec!["u1".into(), "u2".into(), "u3".into()]);

        assert_eq!(image.url_count(), 3);
        assert_eq!(image.representative_url().unwrap(), "u1");
        assert_eq!(image.all_urls(), vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn test_all_urls_is_a_copy() {
        let image = entity();
        image.set_single_url("a");

        let mut urls = image.all_urls();
        urls.push("b".to_string());

        assert_eq!(image.url_count(), 1);
    }

    #[test]
    fn test_thumbnail_prefers_upstream_url() {
        let image = entity().with_thumbnail("https://thumbs.example/t.jpg");
        image.set_single_url("https://i.imgur.com/a.gif");

        assert_eq!(
            image.thumbnail_url().as_deref(),
            Some("https://thumbs.example/t.jpg")
        );
    }

    #[test]
    fn test_thumbnail_placeholder_falls_back_to_first_url() {
        let image = entity().with_thumbnail("nsfw");
        assert!(image.thumbnail_url().is_none());

        image.set_single_url("https://i.imgur.com/a.gif");
        assert_eq!(
            image.thumbnail_url().as_deref(),
            Some("https://i.imgur.com/a.gif")
        );
    }

    #[test]
    fn test_from_post_copies_metadata() {
        let post = PostRecord::new("t3_9", "Dog", "http://x/y.png", "aww", true)
            .with_thumbnail("default");
        let image = ImageEntity::from_post(&post);
        let snapshot = ImageSnapshot::from(&image);

        assert_eq!(snapshot.id, ImageId::new("t3_9"));
        assert_eq!(snapshot.title, "Dog");
        assert_eq!(snapshot.source_group, "aww");
        assert!(snapshot.is_sensitive);
        assert!(snapshot.urls.is_empty());
    }
}
