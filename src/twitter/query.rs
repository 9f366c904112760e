//! Search query construction for the `search/tweets.json` endpoint.

use std::fmt;
use std::str::FromStr;

use crate::error::TweezersError;

/// Number of tweets requested per page; the endpoint's maximum.
pub const MAX_PAGE_SIZE: usize = 100;

/// Retweet exclusion operator, already encoded, including the separating space.
const NO_RETWEETS_FILTER: &str = "%20-filter%3Aretweets";

/// How multiple search words are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    /// Any tweet containing the words, in any order.
    #[default]
    Words,
    /// Only tweets containing all words in the given order.
    Phrase,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Words => "words",
            SearchType::Phrase => "phrase",
        }
    }
}

impl FromStr for SearchType {
    type Err = TweezersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "words" => Ok(SearchType::Words),
            "phrase" => Ok(SearchType::Phrase),
            other => Err(TweezersError::InvalidArgument(format!(
                "Invalid search type '{}': expected 'words' or 'phrase'",
                other
            ))),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which tweets the API should prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultType {
    Mixed,
    #[default]
    Recent,
    Popular,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Mixed => "mixed",
            ResultType::Recent => "recent",
            ResultType::Popular => "popular",
        }
    }
}

impl FromStr for ResultType {
    type Err = TweezersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mixed" => Ok(ResultType::Mixed),
            "recent" => Ok(ResultType::Recent),
            "popular" => Ok(ResultType::Popular),
            other => Err(TweezersError::InvalidArgument(format!(
                "Invalid result type '{}': expected 'mixed', 'recent' or 'popular'",
                other
            ))),
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percent-encodes a raw search term for use in the `q` parameter.
///
/// Each character of a fixed punctuation set (including `%` itself, space,
/// `-`, `.`, `_` and `~`) is replaced by its `%XX` form. Every other character,
/// letters, digits and non-ASCII text included, passes through untouched.
///
/// # Example
///
/// ```rust
/// use tweezers::twitter::url_encode;
///
/// assert_eq!(url_encode("100% #rust"), "100%25%20%23rust");
/// ```
pub fn url_encode(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len() * 3);
    for c in raw.chars() {
        match c {
            '!' | '#' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '/' | ':' | ';' | '='
            | '?' | '@' | '[' | ']' | ' ' | '"' | '-' | '.' | '<' | '>' | '\\' | '^' | '_'
            | '`' | '{' | '|' | '}' | '~' | '%' => {
                encoded.push_str(&format!("%{:02X}", c as u32));
            }
            c => encoded.push(c),
        }
    }
    encoded
}

/// Builds the encoded `q` value for a search.
///
/// - Phrase searches are wrapped in encoded double quotes, unless the term is
///   already quoted.
/// - Retweets are excluded with `-filter:retweets` unless `include_rts` is set.
pub fn make_search_string(search_term: &str, search_type: SearchType, include_rts: bool) -> String {
    let mut s = url_encode(search_term);

    if search_type == SearchType::Phrase && !s.starts_with("%22") {
        s = format!("%22{}%22", s);
    }

    if !include_rts {
        s.push_str(NO_RETWEETS_FILTER);
    }
    s
}

/// Composes the full search URL for one page.
///
/// # Parameters
///
/// - `base_url`: API root ending with `/`
/// - `search_string`: Output of [`make_search_string`]
/// - `language`: ISO 639-1 language code
/// - `result_type`: Result preference
/// - `max_id`: Paging cursor; only tweets with an ID at or below it are returned
pub fn make_url(
    base_url: &str,
    search_string: &str,
    language: &str,
    result_type: ResultType,
    max_id: Option<u64>,
) -> String {
    let mut url = format!(
        "{}search/tweets.json?q={}&lang={}&count={}&result_type={}",
        base_url,
        search_string,
        url_encode(language),
        MAX_PAGE_SIZE,
        result_type.as_str()
    );
    if let Some(max_id) = max_id {
        url.push_str(&format!("&max_id={}", max_id));
    }
    url
}
