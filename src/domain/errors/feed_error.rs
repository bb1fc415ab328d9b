//! Feed loading error types.

use thiserror::Error;

use super::LookupError;

/// Errors surfaced by the feed loading use case.
#[derive(Debug, Error)]
pub enum FeedError {
    /// No source groups are selected, so there is nothing to fetch.
    #[error("no feed sources selected")]
    NoSourcesSelected,

    /// The feed itself could not be fetched.
    #[error("failed to fetch feed: {0}")]
    Lookup(#[from] LookupError),
}
