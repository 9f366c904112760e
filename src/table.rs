//! Tabular projection of search results.
//!
//! Every collected tweet becomes one [`TweetRow`] with derived columns: the
//! text stripped of symbols and links, the URLs, hashtags and mentions found
//! in it, its parsed timestamp and its sentiment.

use chrono::{DateTime, Duration, Utc};
use log::warn;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TweezersError};
use crate::sentiment::SentimentAnalyzer;
use crate::twitter::{strip_ats, strip_hashtags, strip_tweet, strip_urls, Tweet};

const SECONDS_IN_WEEK: i64 = 60 * 60 * 24 * 7;
const MICROSECONDS_IN_WEEK: i64 = SECONDS_IN_WEEK * 1_000_000;

/// One tweet with its derived feature columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TweetRow {
    pub id: u64,
    /// Screen name of the author
    pub user: String,
    /// Original text
    pub tweet: String,
    /// Text without `#`/`@` symbols and URLs
    pub stripped_tweet: String,
    pub urls: Vec<String>,
    pub hashtags: Vec<String>,
    pub ats: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub favorite_count: u64,
    pub retweet_count: u64,
    pub polarity: f64,
    pub subjectivity: f64,
    /// `(latitude, longitude)` when the tweet is geotagged
    pub coordinates: Option<(f64, f64)>,
}

impl TweetRow {
    pub fn from_tweet(tweet: &Tweet, analyzer: &dyn SentimentAnalyzer) -> Result<Self> {
        let stripped_tweet = strip_tweet(&tweet.text);
        let sentiment = analyzer.analyze(&stripped_tweet);

        Ok(TweetRow {
            id: tweet.id,
            user: tweet.user.screen_name.clone(),
            tweet: tweet.text.clone(),
            urls: strip_urls(&tweet.text).matches,
            hashtags: strip_hashtags(&tweet.text).matches,
            ats: strip_ats(&tweet.text).matches,
            stripped_tweet,
            created_at: tweet.created_at_utc()?,
            favorite_count: tweet.favorite_count,
            retweet_count: tweet.retweet_count,
            polarity: sentiment.polarity,
            subjectivity: sentiment.subjectivity,
            coordinates: tweet.geo.as_ref().map(|g| g.coordinates),
        })
    }
}

/// The list-valued columns of a [`TweetRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListColumn {
    Urls,
    Hashtags,
    Ats,
}

impl FromStr for ListColumn {
    type Err = TweezersError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "urls" => Ok(ListColumn::Urls),
            "hashtags" => Ok(ListColumn::Hashtags),
            "ats" => Ok(ListColumn::Ats),
            other => Err(TweezersError::InvalidArgument(format!(
                "Invalid column name: {}",
                other
            ))),
        }
    }
}

/// Search results as rows, in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TweetTable {
    rows: Vec<TweetRow>,
}

impl TweetTable {
    /// Projects tweets into rows, scoring each with `analyzer`.
    ///
    /// # Errors
    ///
    /// Fails if a tweet's `created_at` is not in the v1.1 timestamp format.
    pub fn from_tweets(tweets: &[Tweet], analyzer: &dyn SentimentAnalyzer) -> Result<Self> {
        let rows = tweets
            .iter()
            .map(|t| TweetRow::from_tweet(t, analyzer))
            .collect::<Result<Vec<_>>>()?;
        Ok(TweetTable { rows })
    }

    pub fn rows(&self) -> &[TweetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Average time elapsing between tweets: the span from oldest to newest
    /// divided by the number of rows.
    pub fn time_per_tweet(&self) -> Option<Duration> {
        let oldest = self.rows.iter().map(|r| r.created_at).min()?;
        let newest = self.rows.iter().map(|r| r.created_at).max()?;
        let count = i32::try_from(self.rows.len()).ok()?;
        Some((newest - oldest) / count)
    }

    /// Rough estimate of how many tweets match the search per week.
    ///
    /// Returns `None` when there are no rows or all tweets share one timestamp.
    pub fn tweets_per_week(&self) -> Option<u64> {
        let per_tweet = self.time_per_tweet()?;

        let seconds = per_tweet.num_seconds();
        if seconds > 0 {
            return Some((SECONDS_IN_WEEK / seconds) as u64);
        }

        match per_tweet.num_microseconds() {
            Some(micros) if micros > 0 => Some((MICROSECONDS_IN_WEEK / micros) as u64),
            _ => {
                warn!("All tweets share one timestamp; cannot estimate tweets per week");
                None
            }
        }
    }

    /// Counts the values of a list-valued column across all rows.
    ///
    /// Sorted by descending count; equal counts keep order of first appearance.
    pub fn value_counts(&self, column: ListColumn) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for row in &self.rows {
            let values = match column {
                ListColumn::Urls => &row.urls,
                ListColumn::Hashtags => &row.hashtags,
                ListColumn::Ats => &row.ats,
            };
            for value in values {
                match counts.iter_mut().find(|(v, _)| v == value) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((value.clone(), 1)),
                }
            }
        }
        // Stable sort keeps first-appearance order among ties.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let mut clipped: String = text.chars().take(width.saturating_sub(3)).collect();
        clipped.push_str("...");
        clipped
    } else {
        text.to_string()
    }
}

impl fmt::Display for TweetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:<50} {:<20} {:>5} {:>5} {:>9} {:>12}",
            "user", "stripped_tweet", "created_at", "favs", "rts", "polarity", "subjectivity"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<16} {:<50} {:<20} {:>5} {:>5} {:>9.3} {:>12.3}",
                clip(&row.user, 16),
                clip(&row.stripped_tweet, 50),
                row.created_at.format("%Y-%m-%d %H:%M:%S"),
                row.favorite_count,
                row.retweet_count,
                row.polarity,
                row.subjectivity
            )?;
        }
        Ok(())
    }
}
