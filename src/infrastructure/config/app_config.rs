//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::domain::ports::{DEFAULT_PAGE_SIZE, FeedRequest};
use crate::infrastructure::imgur::IMGUR_API_BASE;
use crate::infrastructure::reddit::REDDIT_BASE_URL;

pub(crate) const APP_NAME: &str = "imgfeed";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Seconds the CLI waits for pending lookups.
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,

    /// Feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Image host configuration.
    #[serde(default)]
    pub imgur: ImgurConfig,

    /// HTTP client configuration.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Source groups loaded when none are given on the command line.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Posts per page.
    #[serde(default = "default_page_size")]
    pub page_size: u8,

    /// Listing API base URL.
    #[serde(default = "default_feed_base_url")]
    pub base_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            base_url: default_feed_base_url(),
        }
    }
}

/// Image host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImgurConfig {
    /// API client id sent with every lookup.
    #[serde(default)]
    pub client_id: Option<String>,

    /// API base URL.
    #[serde(default = "default_imgur_base_url")]
    pub base_url: String,
}

impl Default for ImgurConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            base_url: default_imgur_base_url(),
        }
    }
}

/// HTTP client configuration shared by the adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_wait_secs() -> u64 {
    10
}

fn default_page_size() -> u8 {
    DEFAULT_PAGE_SIZE
}

fn default_feed_base_url() -> String {
    REDDIT_BASE_URL.to_string()
}

fn default_imgur_base_url() -> String {
    IMGUR_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION"))
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if !args.sources.is_empty() {
            self.feed.sources.clone_from(&args.sources);
        }
        if let Some(limit) = args.limit {
            self.feed.page_size = limit;
        }
        if let Some(client_id) = &args.imgur_client_id {
            self.imgur.client_id = Some(client_id.clone());
        }
        if let Some(wait_secs) = args.wait_secs {
            self.wait_secs = wait_secs;
        }
    }

    /// Builds the feed request for the configured sources.
    #[must_use]
    pub fn feed_request(&self) -> FeedRequest {
        FeedRequest::new(self.feed.sources.iter().cloned()).with_limit(self.feed.page_size)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            wait_secs: default_wait_secs(),
            feed: FeedConfig::default(),
            imgur: ImgurConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_sections() {
        let toml_content = r#"
            log_level = "debug"

            [feed]
            sources = ["gifs", "aww"]
            page_size = 50

            [imgur]
            client_id = "abc123"

            [http]
            timeout_secs = 5
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.feed.sources, vec!["gifs", "aww"]);
        assert_eq!(config.feed.page_size, 50);
        assert_eq!(config.feed.base_url, REDDIT_BASE_URL);
        assert_eq!(config.imgur.client_id.as_deref(), Some("abc123"));
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert!(config.http.user_agent.starts_with("imgfeed/"));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.feed.sources.is_empty());
        assert_eq!(config.feed.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.imgur.client_id.is_none());
        assert_eq!(config.wait_secs, 10);
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = AppConfig::default();
        config.feed.sources = vec!["pics".to_string()];

        let args = CliArgs {
            sources: vec!["gifs".to_string()],
            limit: Some(5),
            log_level: Some(LogLevel::Trace),
            imgur_client_id: Some("cli-id".to_string()),
            config: Some(PathBuf::from("/tmp/other.toml")),
            ..CliArgs::default()
        };
        config.merge_with_args(&args);

        assert_eq!(config.feed.sources, vec!["gifs"]);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.imgur.client_id.as_deref(), Some("cli-id"));

        let request = config.feed_request();
        assert_eq!(request.limit(), 5);
        assert_eq!(request.joined_sources(), "gifs");
    }

    #[test]
    fn test_empty_cli_sources_keep_config() {
        let mut config = AppConfig::default();
        config.feed.sources = vec!["pics".to_string()];

        config.merge_with_args(&CliArgs::default());

        assert_eq!(config.feed.sources, vec!["pics"]);
    }
}
