//! Domain entity definitions.

mod collection;
mod image;
mod post;

pub use collection::ImageCollection;
pub use image::{ImageEntity, ImageId, ImageSnapshot, SharedImage};
pub use post::{PostPage, PostRecord};
