//! Tweet search functionality for Twitter API.
//!
//! This module runs paginated searches against the v1.1 `search/tweets.json`
//! endpoint. Each page is requested with a `max_id` cursor one below the
//! smallest ID collected so far, so every page holds strictly older tweets.

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::error::{Result, TweezersError};
use crate::sentiment::SentimentAnalyzer;
use crate::table::{ListColumn, TweetTable};

use super::auth::TweezerAuth;
use super::query::{make_search_string, make_url, ResultType, SearchType};
use super::tweet::Tweet;

/// One page of the search endpoint's response.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    statuses: Vec<Value>,
    #[serde(default)]
    search_metadata: SearchMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct SearchMetadata {
    /// Seconds the API spent on the page
    #[serde(default)]
    completed_in: f64,
}

/// Arguments of a search.
///
/// # Example
///
/// ```rust
/// use tweezers::{ResultType, SearchParams, SearchType};
///
/// let params = SearchParams::new("rust lang")
///     .total(250)
///     .search_type(SearchType::Phrase)
///     .result_type(ResultType::Mixed);
/// assert_eq!(params.language, "en");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// Term(s) to search for
    pub search_term: String,
    /// Language to search in
    pub language: String,
    /// Desired number of tweets. Fewer may come back if the API runs out of
    /// matching tweets or stops answering.
    pub total: usize,
    pub result_type: ResultType,
    pub search_type: SearchType,
    /// Whether to include retweets
    pub include_rts: bool,
}

impl SearchParams {
    pub fn new(search_term: impl Into<String>) -> Self {
        SearchParams {
            search_term: search_term.into(),
            language: "en".to_string(),
            total: 100,
            result_type: ResultType::default(),
            search_type: SearchType::default(),
            include_rts: false,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    pub fn result_type(mut self, result_type: ResultType) -> Self {
        self.result_type = result_type;
        self
    }

    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn include_rts(mut self, include_rts: bool) -> Self {
        self.include_rts = include_rts;
        self
    }
}

/// A completed search and its results.
#[derive(Debug, Clone)]
pub struct TweezerSearch {
    params: SearchParams,
    search_string: String,
    results_json: Vec<Value>,
    tweets: Vec<Tweet>,
    ids: Vec<u64>,
    completed_in: f64,
    result_count: usize,
    table: TweetTable,
    tweet_features: Vec<String>,
    entities: Vec<String>,
    user_features: Vec<String>,
}

fn object_keys(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_object)
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default()
}

impl TweezerSearch {
    /// Runs a search, paging until `params.total` tweets are collected.
    ///
    /// Paging stops early when the API answers with a non-200 status or with
    /// an empty page. Results are clipped to `params.total`.
    ///
    /// # Parameters
    ///
    /// - `auth`: Credential holder to send requests with
    /// - `params`: What to search for
    /// - `analyzer`: Sentiment model applied to every stripped tweet
    ///
    /// # Returns
    ///
    /// - `Ok(TweezerSearch)`: At least one tweet was collected
    /// - `Err(TweezersError::NoResults)`: The first page was empty
    /// - `Err(TweezersError::Api)`: The first request failed with a non-200 status
    /// - `Err(TweezersError::InvalidArgument)`: `params.total` is zero
    /// - `Err(...)`: Transport, JSON or timestamp errors
    pub async fn run(
        auth: &TweezerAuth,
        params: SearchParams,
        analyzer: &dyn SentimentAnalyzer,
    ) -> Result<Self> {
        if params.total == 0 {
            return Err(TweezersError::InvalidArgument(
                "total must be greater than zero".to_string(),
            ));
        }

        let search_string =
            make_search_string(&params.search_term, params.search_type, params.include_rts);
        info!(
            "Starting search for '{}' ({} tweets requested)",
            params.search_term, params.total
        );

        let mut results_json: Vec<Value> = Vec::new();
        let mut tweets: Vec<Tweet> = Vec::new();
        let mut ids: Vec<u64> = Vec::new();
        let mut completed_in = 0.0;
        let mut next_max_id: Option<u64> = None;
        let mut last_status = 200;

        while tweets.len() < params.total {
            let url = make_url(
                auth.base_url(),
                &search_string,
                &params.language,
                params.result_type,
                next_max_id,
            );
            let response = auth.get(&url, "search_tweets").await?;

            if !response.is_success() {
                warn!("Unsuccessful request, status code: {}", response.status);
                last_status = response.status;
                break;
            }

            let page: SearchPage = response.json()?;

            if page.statuses.is_empty() {
                if tweets.is_empty() {
                    return Err(TweezersError::NoResults);
                }
                info!("No more tweets returned, ending search");
                break;
            }

            debug!("Received page of {} tweets", page.statuses.len());
            for status in page.statuses {
                let tweet: Tweet = serde_json::from_value(status.clone())?;
                ids.push(tweet.id);
                tweets.push(tweet);
                results_json.push(status);
            }

            next_max_id = ids.iter().min().and_then(|id| id.checked_sub(1));
            completed_in += page.search_metadata.completed_in;

            if next_max_id.is_none() {
                info!("Reached the oldest possible tweet ID, ending search");
                break;
            }
        }

        if tweets.is_empty() {
            return Err(TweezersError::Api {
                operation: "search_tweets".to_string(),
                status: last_status,
            });
        }

        // Trim the results to the count limit
        results_json.truncate(params.total);
        tweets.truncate(params.total);
        ids.truncate(params.total);
        let result_count = tweets.len();

        info!(
            "{} tweets requested, {} tweets returned",
            params.total, result_count
        );

        let table = TweetTable::from_tweets(&tweets, analyzer)?;

        let first = results_json.first();
        let tweet_features = object_keys(first);
        let entities = object_keys(first.and_then(|t| t.get("entities")));
        let user_features = object_keys(first.and_then(|t| t.get("user")));

        Ok(TweezerSearch {
            params,
            search_string,
            results_json,
            tweets,
            ids,
            completed_in,
            result_count,
            table,
            tweet_features,
            entities,
            user_features,
        })
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn search_term(&self) -> &str {
        &self.params.search_term
    }

    /// Encoded `q` value the search was sent with.
    pub fn search_string(&self) -> &str {
        &self.search_string
    }

    /// Raw JSON of every collected tweet.
    pub fn results_json(&self) -> &[Value] {
        &self.results_json
    }

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    /// Tweet IDs in the order received.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Total seconds the API reported spending across all pages.
    pub fn completed_in(&self) -> f64 {
        self.completed_in
    }

    pub fn result_count(&self) -> usize {
        self.result_count
    }

    pub fn table(&self) -> &TweetTable {
        &self.table
    }

    /// Top-level fields available on the returned tweets.
    pub fn tweet_features(&self) -> &[String] {
        &self.tweet_features
    }

    /// Entity kinds available on the returned tweets.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Fields available on the returned tweets' `user` objects.
    pub fn user_features(&self) -> &[String] {
        &self.user_features
    }

    /// The named field of every result, `Value::Null` where a tweet lacks it.
    pub fn list_feature(&self, feature: &str) -> Vec<Value> {
        self.results_json
            .iter()
            .map(|t| t.get(feature).cloned().unwrap_or(Value::Null))
            .collect()
    }

    pub fn time_per_tweet(&self) -> Option<chrono::Duration> {
        self.table.time_per_tweet()
    }

    pub fn tweets_per_week(&self) -> Option<u64> {
        self.table.tweets_per_week()
    }

    /// Counts the values in the `urls`, `hashtags` or `ats` column.
    pub fn count_list_col_values(&self, col: &str) -> Result<Vec<(String, usize)>> {
        let column: ListColumn = col.parse()?;
        Ok(self.table.value_counts(column))
    }
}

impl fmt::Display for TweezerSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TweezerSearch instance created with arguments:\n\tsearch_term = {}\n\ttotal = {}",
            self.params.search_term, self.params.total
        )
    }
}
