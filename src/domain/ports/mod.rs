mod collection_observer_port;
mod image_host_port;
mod post_feed_port;

pub use collection_observer_port::CollectionObserver;
pub use image_host_port::ImageHostPort;
pub use post_feed_port::{DEFAULT_PAGE_SIZE, FeedRequest, PostFeedPort};

#[cfg(test)]
pub mod mocks {
    pub use super::collection_observer_port::mock::{ObservedEvent, RecordingObserver};
    pub use super::image_host_port::mock::MockImageHost;
    pub use super::post_feed_port::MockPostFeedPort;
}
