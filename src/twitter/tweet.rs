//! Typed view of a status object returned by the v1.1 search endpoint.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TweezersError};

/// Format of `created_at` in v1.1 payloads, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S +0000 %Y";

/// The fields of a tweet the result table is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    pub text: String,
    pub created_at: String,
    pub user: TweetUser,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub favorite_count: u64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub retweet_count: u64,
    #[serde(default)]
    pub geo: Option<Geo>,
}

/// Counts the API reports as `null` are read as 0.
fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetUser {
    pub screen_name: String,
}

/// Point location attached to a tweet, `[latitude, longitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub coordinates: (f64, f64),
}

impl Tweet {
    /// Parses `created_at` as a UTC timestamp.
    pub fn created_at_utc(&self) -> Result<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)
            .map(|dt| dt.and_utc())
            .map_err(|e| {
                TweezersError::MalformedResponse(format!(
                    "Failed to parse created_at '{}' of tweet {}: {}",
                    self.created_at, self.id, e
                ))
            })
    }
}
