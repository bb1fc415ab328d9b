//! Data transfer objects for the application layer.

mod feed_dto;

pub use feed_dto::{FeedResponse, PendingResolutions, ResolvedBatch};
