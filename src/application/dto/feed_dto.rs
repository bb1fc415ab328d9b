//! Feed and resolution DTOs.

use futures_util::future::join_all;
use tokio::task::JoinHandle;
use tracing::error;

use crate::domain::entities::SharedImage;

/// Lookups still running for a batch.
///
/// Dropping this detaches the lookups; they keep running to completion.
#[derive(Debug, Default)]
pub struct PendingResolutions {
    handles: Vec<JoinHandle<()>>,
}

impl PendingResolutions {
    pub(crate) const fn new(handles: Vec<JoinHandle<()>>) -> Self {
        Self { handles }
    }

    /// Number of lookups dispatched.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every lookup to finish.
    pub async fn join(self) {
        for result in join_all(self.handles).await {
            if let Err(e) = result {
                error!(error = %e, "Resolution task did not complete");
            }
        }
    }
}

/// Result of running a batch of posts through the resolution pipeline.
#[derive(Debug)]
pub struct ResolvedBatch {
    /// Entities appended to the collection, in post order.
    pub added: Vec<SharedImage>,
    /// Lookups dispatched for entities in `added`.
    pub pending: PendingResolutions,
}

/// Feed page loading response.
#[derive(Debug)]
pub struct FeedResponse {
    /// Entities appended to the collection, in post order.
    pub added: Vec<SharedImage>,
    /// Cursor for the newer page.
    pub before: Option<String>,
    /// Cursor for the older page.
    pub after: Option<String>,
    /// Lookups still running for `added`.
    pub pending: PendingResolutions,
}

impl FeedResponse {
    /// Builds a response from a resolved batch and the page cursors.
    #[must_use]
    pub fn new(batch: ResolvedBatch, before: Option<String>, after: Option<String>) -> Self {
        Self {
            added: batch.added,
            before,
            after,
            pending: batch.pending,
        }
    }
}
