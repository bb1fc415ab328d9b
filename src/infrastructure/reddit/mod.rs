//! Reddit feed adapter.

mod client;
mod dto;

pub use client::{REDDIT_BASE_URL, RedditFeedClient};
