//! Pure domain services.

pub mod media;
pub mod url_classifier;

pub use media::is_direct_image;
pub use url_classifier::{
    Classification, classify, classify_with, is_album, is_gallery, is_recognized_host, normalize,
};
