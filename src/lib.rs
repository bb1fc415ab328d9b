//! imgfeed - incremental image collection built from a feed of link posts.
//!
//! Posts that link straight to an image are accepted immediately; links to a
//! recognized image host are appended unresolved and looked up in the
//! background, with observers told when each one fills in.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, services and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "imgfeed";
