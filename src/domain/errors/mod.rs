//! Domain error types.

mod feed_error;
mod image_error;
mod lookup_error;

pub use feed_error::FeedError;
pub use image_error::ImageError;
pub use lookup_error::LookupError;
