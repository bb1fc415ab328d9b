//! Feed page loading use case.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::ResolutionPipeline;
use crate::application::dto::FeedResponse;
use crate::domain::errors::FeedError;
use crate::domain::ports::{FeedRequest, PostFeedPort};

/// Fetches a page of posts and runs it through the resolution pipeline.
#[derive(Clone)]
pub struct LoadFeedUseCase {
    feed_port: Arc<dyn PostFeedPort>,
    pipeline: ResolutionPipeline,
}

impl LoadFeedUseCase {
    /// Creates new feed loading use case.
    #[must_use]
    pub const fn new(feed_port: Arc<dyn PostFeedPort>, pipeline: ResolutionPipeline) -> Self {
        Self {
            feed_port,
            pipeline,
        }
    }

    #[must_use]
    pub const fn pipeline(&self) -> &ResolutionPipeline {
        &self.pipeline
    }

    /// Loads the page described by `request` and appends it to the collection.
    ///
    /// # Errors
    /// Returns `FeedError::NoSourcesSelected` if no source is selected, or
    /// `FeedError::Lookup` if the feed cannot be fetched. The collection is
    /// untouched in both cases.
    pub async fn execute(&self, request: FeedRequest) -> Result<FeedResponse, FeedError> {
        if request.selected_sources().next().is_none() {
            debug!("No sources selected, skipping feed request");
            return Err(FeedError::NoSourcesSelected);
        }

        debug!(
            sources = %request.joined_sources(),
            limit = request.limit(),
            before = ?request.before,
            after = ?request.after,
            "Fetching feed page"
        );

        let page = self.feed_port.fetch_posts(&request).await.map_err(|e| {
            error!(error = %e, "Failed to fetch feed page");
            FeedError::from(e)
        })?;

        let batch = self.pipeline.resolve_batch(&page.posts);

        info!(
            posts = page.posts.len(),
            added = batch.added.len(),
            pending = batch.pending.len(),
            "Feed page loaded"
        );

        Ok(FeedResponse::new(batch, page.before, page.after))
    }

    /// Clears the collection and loads the first page for a new selection.
    ///
    /// # Errors
    /// Same as [`Self::execute`]; the collection stays empty on error.
    pub async fn refresh(&self, request: FeedRequest) -> Result<FeedResponse, FeedError> {
        self.pipeline.reset();
        self.execute(request).await
    }
}
