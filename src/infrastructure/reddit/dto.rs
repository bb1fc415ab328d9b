//! Reddit listing response shapes, flattened into domain posts at the boundary.

use chrono::DateTime;
use serde::Deserialize;

use crate::domain::entities::{PostPage, PostRecord};

/// `/r/{subs}/new.json` listing response.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub data: Option<ListingData>,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
    pub before: Option<String>,
    pub after: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListingChild {
    pub data: LinkData,
}

/// A single link post.
#[derive(Debug, Deserialize)]
pub struct LinkData {
    /// Fullname such as `t3_abc123`; doubles as the paging cursor.
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub over_18: bool,
    pub thumbnail: Option<String>,
    pub created_utc: Option<f64>,
}

impl LinkData {
    /// Converts to a domain post. Posts without a URL are skipped.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn into_post(self) -> Option<PostRecord> {
        let url = self.url?;
        let mut post = PostRecord::new(self.name, self.title, url, self.subreddit, self.over_18);
        if let Some(thumbnail) = self.thumbnail.filter(|t| !t.is_empty()) {
            post = post.with_thumbnail(thumbnail);
        }
        if let Some(created) = self
            .created_utc
            .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
        {
            post = post.with_created_at(created);
        }
        Some(post)
    }
}

impl From<ListingResponse> for PostPage {
    fn from(response: ListingResponse) -> Self {
        let Some(data) = response.data else {
            return Self::default();
        };

        let posts = data
            .children
            .into_iter()
            .filter_map(|child| child.data.into_post())
            .collect();

        Self::new(posts).with_cursors(data.before, data.after)
    }
}

/// Reddit error body.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
}
