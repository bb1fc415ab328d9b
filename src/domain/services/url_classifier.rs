//! Classification and normalization of image host URLs.
//!
//! Pure string functions: no state, no I/O, total over any input.

use super::media::is_direct_image;

/// Domain of the recognized third-party image host.
pub const RECOGNIZED_HOST: &str = "imgur.com";

const GALLERY_SEGMENT: &str = "gallery";
const ALBUM_SEGMENT: &str = "a";
const ALBUM_REPLACEMENT: &str = "album";

/// How a post URL should be turned into image URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Neither a direct image nor a recognized host.
    NotApplicable,
    /// The URL already points at an image file.
    DirectImage,
    /// A single image hosted on the recognized host, keyed by normalized id.
    SingleHostedImage(String),
    /// A gallery or album on the recognized host, keyed by normalized id.
    GalleryOrAlbum(String),
}

impl Classification {
    /// Returns the normalized upstream id, if a lookup is needed.
    #[must_use]
    pub fn lookup_id(&self) -> Option<&str> {
        match self {
            Self::SingleHostedImage(id) | Self::GalleryOrAlbum(id) => Some(id),
            Self::NotApplicable | Self::DirectImage => None,
        }
    }
}

/// Classifies a URL using the default direct-image predicate.
#[must_use]
pub fn classify(url: &str) -> Classification {
    classify_with(url, is_direct_image)
}

/// Classifies a URL with a caller-supplied direct-image predicate.
///
/// The predicate wins over host recognition, so `i.imgur.com/x.gif` is direct.
#[must_use]
pub fn classify_with(url: &str, is_direct: impl Fn(&str) -> bool) -> Classification {
    if is_direct(url) {
        Classification::DirectImage
    } else if !is_recognized_host(url) {
        Classification::NotApplicable
    } else if is_gallery(url) || is_album(url) {
        Classification::GalleryOrAlbum(normalize(url))
    } else {
        Classification::SingleHostedImage(normalize(url))
    }
}

/// Returns true if the URL's host token contains the recognized image host.
///
/// Case-insensitive substring match on the host only, so `i.imgur.com` and
/// `imgur.com.example` match while `example.com/imgur.com` does not.
#[must_use]
pub fn is_recognized_host(url: &str) -> bool {
    let host = host_token(url).to_ascii_lowercase();
    let host = host.split(':').next().unwrap_or_default();

    host.contains(RECOGNIZED_HOST)
}

/// Returns true for recognized-host URLs with a `gallery` path segment.
#[must_use]
pub fn is_gallery(url: &str) -> bool {
    is_recognized_host(url) && path_segments(url).any(|s| s == GALLERY_SEGMENT)
}

/// Returns true for recognized-host URLs with an `a` path segment.
#[must_use]
pub fn is_album(url: &str) -> bool {
    is_recognized_host(url) && path_segments(url).any(|s| s == ALBUM_SEGMENT)
}

/// Reduces a host URL to the identifier the upstream API expects.
///
/// Scheme, host, query and fragment are removed. A leading `a/` becomes
/// `album/`. When a query string was present the file extension goes too,
/// otherwise it is kept: `i.host/x.jpg?5` gives `x`, `host/x.gif` gives `x.gif`.
#[must_use]
pub fn normalize(url: &str) -> String {
    let path = path_part(url);

    let (path, had_query) = match path.find('?') {
        Some(idx) => (&path[..idx], true),
        None => (path, false),
    };
    let path = path.split('#').next().unwrap_or_default();
    let path = if had_query { strip_extension(path) } else { path };

    match path.split_once('/') {
        Some((ALBUM_SEGMENT, rest)) => format!("{ALBUM_REPLACEMENT}/{rest}"),
        None if path == ALBUM_SEGMENT => ALBUM_REPLACEMENT.to_string(),
        _ => path.to_string(),
    }
}

fn strip_scheme(url: &str) -> &str {
    let url = url.trim();
    match url.find("://") {
        Some(idx) if url[..idx].chars().all(|c| c.is_ascii_alphanumeric()) => &url[idx + 3..],
        _ => url,
    }
}

fn host_token(url: &str) -> &str {
    let rest = strip_scheme(url);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

/// Everything after the host, without the leading slash.
fn path_part(url: &str) -> &str {
    let rest = strip_scheme(url);
    let host_len = host_token(url).len();
    let after_host = &rest[host_len..];
    after_host.strip_prefix('/').unwrap_or(after_host)
}

fn path_segments(url: &str) -> impl Iterator<Item = &str> {
    let path = path_part(url);
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/')
}

fn strip_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..segment_start + dot],
        _ => path,
    }
}
