//! Reddit listing HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::{ErrorResponse, ListingResponse};
use crate::domain::entities::PostPage;
use crate::domain::errors::LookupError;
use crate::domain::ports::{FeedRequest, PostFeedPort};
use crate::infrastructure::config::HttpConfig;
use crate::infrastructure::http::{build_client, map_transport_error};

/// Default Reddit base URL.
pub const REDDIT_BASE_URL: &str = "https://www.reddit.com";

/// Feed adapter over the public Reddit listing API.
pub struct RedditFeedClient {
    client: Client,
    base_url: String,
}

impl RedditFeedClient {
    /// Creates client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(http: &HttpConfig) -> Result<Self, LookupError> {
        Self::with_base_url(REDDIT_BASE_URL, http)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        http: &HttpConfig,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client(http)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn listing_url(&self, request: &FeedRequest) -> String {
        format!("{}/r/{}/new.json", self.base_url, request.joined_sources())
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> LookupError {
        let message = match response.json::<ErrorResponse>().await {
            Ok(error) if !error.message.is_empty() => error.message,
            _ => format!("HTTP {status}"),
        };

        match status {
            StatusCode::TOO_MANY_REQUESTS => LookupError::RateLimited {
                retry_after_secs: 60,
            },
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                LookupError::network("Reddit is temporarily unavailable")
            }
            _ => LookupError::status(status.as_u16(), message),
        }
    }
}

#[async_trait]
impl PostFeedPort for RedditFeedClient {
    async fn fetch_posts(&self, request: &FeedRequest) -> Result<PostPage, LookupError> {
        let url = self.listing_url(request);

        let mut query: Vec<(&str, String)> = vec![("limit", request.limit().to_string())];
        if let Some(before) = &request.before {
            query.push(("before", before.clone()));
        }
        if let Some(after) = &request.after {
            query.push(("after", after.clone()));
        }

        debug!(url = %url, "Requesting listing");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to connect to Reddit");
                map_transport_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let listing: ListingResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse listing response");
            LookupError::decode(e.to_string())
        })?;

        let page = PostPage::from(listing);
        debug!(posts = page.posts.len(), after = ?page.after, "Listing fetched");

        Ok(page)
    }
}
