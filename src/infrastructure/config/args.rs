use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(
    name = "imgfeed",
    version,
    about = "Builds an image collection from link posts, resolving hosted galleries",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Source group to load; repeat for several.
    #[arg(short, long = "source", value_name = "NAME")]
    pub sources: Vec<String>,

    /// Posts per page.
    #[arg(short, long)]
    pub limit: Option<u8>,

    /// Load the page before this cursor.
    #[arg(long, value_name = "CURSOR", conflicts_with_all = ["after", "next"])]
    pub before: Option<String>,

    /// Load the page after this cursor.
    #[arg(long, value_name = "CURSOR", conflicts_with = "next")]
    pub after: Option<String>,

    /// Continue after the last page loaded in the previous run.
    #[arg(long)]
    pub next: bool,

    /// Imgur API client id.
    #[arg(long, env = "IMGFEED_IMGUR_CLIENT_ID", hide_env_values = true)]
    pub imgur_client_id: Option<String>,

    /// Seconds to wait for pending lookups before printing.
    #[arg(long)]
    pub wait_secs: Option<u64>,

    /// Print the collection as JSON.
    #[arg(long)]
    pub json: bool,
}
