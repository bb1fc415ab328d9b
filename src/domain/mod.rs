//! Domain layer with core entities, pure services and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// URL classification and media detection.
pub mod services;

pub use entities::{ImageCollection, ImageEntity, ImageId, PostPage, PostRecord, SharedImage};
pub use errors::{FeedError, ImageError, LookupError};
pub use ports::{CollectionObserver, FeedRequest, ImageHostPort, PostFeedPort};
