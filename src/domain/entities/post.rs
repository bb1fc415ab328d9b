use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link post handed over by the feed transport.
///
/// Immutable once constructed; the resolution pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    id: String,
    title: String,
    url: String,
    source_group: String,
    is_sensitive: bool,
    thumbnail: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl PostRecord {
    /// Creates a new post record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        source_group: impl Into<String>,
        is_sensitive: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            source_group: source_group.into(),
            is_sensitive,
            thumbnail: None,
            created_at: None,
        }
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Feed group (subreddit) the post was published in.
    #[must_use]
    pub fn source_group(&self) -> &str {
        &self.source_group
    }

    #[must_use]
    pub const fn is_sensitive(&self) -> bool {
        self.is_sensitive
    }

    /// Thumbnail as sent upstream. May be a placeholder such as `"self"`.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// One page of posts with the opaque cursors needed to fetch its neighbours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPage {
    /// Posts in feed order.
    pub posts: Vec<PostRecord>,
    /// Cursor for the page before this one.
    pub before: Option<String>,
    /// Cursor for the page after this one.
    pub after: Option<String>,
}

impl PostPage {
    #[must_use]
    pub const fn new(posts: Vec<PostRecord>) -> Self {
        Self {
            posts,
            before: None,
            after: None,
        }
    }

    #[must_use]
    pub fn with_cursors(mut self, before: Option<String>, after: Option<String>) -> Self {
        self.before = before;
        self.after = after;
        self
    }
}
