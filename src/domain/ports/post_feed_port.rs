//! Port for fetching pages of link posts.

use async_trait::async_trait;

use crate::domain::entities::PostPage;
use crate::domain::errors::LookupError;

/// Default number of posts requested per page.
pub const DEFAULT_PAGE_SIZE: u8 = 20;

const MAX_PAGE_SIZE: u8 = 100;

/// Which posts to fetch and where to page from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub sources: Vec<String>,
    limit: u8,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Default for FeedRequest {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            limit: DEFAULT_PAGE_SIZE,
            before: None,
            after: None,
        }
    }
}

impl FeedRequest {
    #[must_use]
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the page size. Zero falls back to the default, anything above
    /// the upstream maximum is capped.
    #[must_use]
    pub const fn with_limit(mut self, limit: u8) -> Self {
        self.limit = match limit {
            0 => DEFAULT_PAGE_SIZE,
            1..MAX_PAGE_SIZE => limit,
            _ => MAX_PAGE_SIZE,
        };
        self
    }

    #[must_use]
    pub const fn limit(&self) -> u8 {
        self.limit
    }

    #[must_use]
    pub fn before_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn after_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Selected sources with blanks removed.
    pub fn selected_sources(&self) -> impl Iterator<Item = &str> {
        self.sources
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Sources in the upstream multi-group form, e.g. `gifs+aww`.
    #[must_use]
    pub fn joined_sources(&self) -> String {
        self.selected_sources().collect::<Vec<_>>().join("+")
    }
}

/// Port for the feed transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostFeedPort: Send + Sync {
    /// Fetches one page of posts for the requested sources.
    async fn fetch_posts(&self, request: &FeedRequest) -> Result<PostPage, LookupError>;
}
