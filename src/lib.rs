//! # Tweezers Library
//!
//! A lightweight library for scraping Twitter data through the v1.1 search API.
//! Searches are paginated with a decreasing `max_id` cursor until the requested
//! number of tweets is collected, and every tweet is projected into a table row
//! with the URLs, hashtags and mentions found in its text plus a sentiment score.
//!
//! ## Features
//!
//! - OAuth 1.0a (HMAC-SHA1) signed requests, with credentials verified up front
//! - Paginated search with phrase matching and retweet filtering
//! - Regex-based extraction of URLs, mentions and hashtags
//! - Pluggable sentiment scoring with a built-in lexicon analyzer
//! - An HTTP service exposing searches as JSON (`/`, `/health`, `/search`)
//!
//! ## Configuration
//!
//! - `xapi_consumer_key`, `xapi_consumer_secret`: Twitter app credentials
//! - `xapi_access_token`, `xapi_access_token_secret`: User credentials
//! - `xapi_base_url`: API root override (defaults to `https://api.twitter.com/1.1/`)
//! - `PORT`: Server port (defaults to 3000)
//! - `RUST_LOG`: Log level filter

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod oauth;
pub mod sentiment;
pub mod table;
pub mod twitter;

// Re-export commonly used types and functions
pub use client::Tweezers;
pub use config::{get_server_port, TwitterConfig};
pub use error::{Result, TweezersError};
pub use handlers::{handle_health, handle_root, handle_search};
pub use sentiment::{LexiconAnalyzer, Sentiment, SentimentAnalyzer};
pub use table::{ListColumn, TweetRow, TweetTable};
pub use twitter::{ResultType, SearchParams, SearchType, TweezerAuth, TweezerSearch};

#[cfg(test)]
mod tests;
