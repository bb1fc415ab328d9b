//! Imgur image host adapter.

mod client;
mod dto;

pub use client::{IMGUR_API_BASE, ImgurClient};
