use regex::Regex;
use std::sync::LazyLock;

/// Returns true if the URL points straight at an image file, judged by extension.
///
/// A trailing query string or fragment is ignored, so `x.jpg?5` counts.
#[must_use]
pub fn is_direct_image(url: &str) -> bool {
    static IMAGE_EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)^[^?#]+\.(?:png|jpe?g|gif|webp|bmp)(?:[?#].*)?$")
            .expect("image extension pattern is valid")
    });

    IMAGE_EXTENSION_RE.is_match(url.trim())
}
