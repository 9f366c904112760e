//! Twitter API integration module.
//!
//! This module contains the credential holder, query construction, the
//! paginated search loop and tweet text parsing for the v1.1 search API,
//! using OAuth 1.0a user context authentication.

mod api;
mod auth;
mod parsing;
mod query;
mod search;
mod tweet;

// Re-export public API
pub use api::ApiResponse;
pub use auth::TweezerAuth;
pub use parsing::{strip_ats, strip_hashtags, strip_regex, strip_tweet, strip_urls, Stripped};
pub use query::{make_search_string, make_url, url_encode, ResultType, SearchType, MAX_PAGE_SIZE};
pub use search::{SearchParams, TweezerSearch};
pub use tweet::{Geo, Tweet, TweetUser, CREATED_AT_FORMAT};

// Crate-internal re-exports (used by tests)
#[allow(unused_imports)]
pub(crate) use api::sanitize_for_logging;
