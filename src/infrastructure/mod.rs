//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Observer adapters.
pub mod events;
pub mod http;
/// Imgur image host client.
pub mod imgur;
/// Reddit feed client.
pub mod reddit;

pub use config::{AppConfig, CliArgs, ConfigStore, LogLevel, StateConfig};
pub use events::{ChannelObserver, CollectionEvent};
pub use imgur::ImgurClient;
pub use reddit::RedditFeedClient;
