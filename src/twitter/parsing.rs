//! Text parsing and extraction utilities for Twitter content.
//!
//! This module contains functions for stripping mentions, hashtags and URLs
//! out of tweet text, keeping what was removed.

use regex::Regex;
use std::sync::OnceLock;

/// Crude URL matcher: any `http`/`https` prefix followed by non-whitespace.
/// Non-HTTP schemes such as `mailto:` are not recognised.
const URL_PATTERN: &str = r"([Hh][Tt][Tt][Pp][Ss]?[:/][^\s]+)";

/// An `@handle` at the start of the text or after a character that cannot be
/// part of a handle or e-mail address.
const MENTION_PATTERN: &str = r"(?:^|[^a-zA-Z0-9\-_.])(@[A-Za-z]+[A-Za-z0-9]+)";

const HASHTAG_PATTERN: &str = r"#(\w+)";

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in pattern is valid"))
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, URL_PATTERN)
}

fn mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, MENTION_PATTERN)
}

fn hashtag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, HASHTAG_PATTERN)
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\s+")
}

/// What [`strip_regex`] found and what was left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    /// Matched texts, in order of appearance
    pub matches: Vec<String>,
    /// Number of matches
    pub count: usize,
    /// Input minus the matches, whitespace collapsed and trimmed
    pub text: String,
}

/// Strips a tweet of any text matching the supplied regex.
///
/// When the regex has a capture group, group 1 is both what gets reported in
/// `matches` and what gets removed, so context consumed around it (such as a
/// leading space) survives.
///
/// # Parameters
///
/// - `tweet`: Text to strip
/// - `re`: Pattern to remove
///
/// # Returns
///
/// The matches, their count, and the remaining text with runs of whitespace
/// collapsed to a single space.
pub fn strip_regex(tweet: &str, re: &Regex) -> Stripped {
    let mut matches = Vec::new();
    let mut remainder = String::with_capacity(tweet.len());
    let mut last_end = 0;

    for caps in re.captures_iter(tweet) {
        let Some(m) = caps.get(1).or_else(|| caps.get(0)) else {
            continue;
        };
        matches.push(m.as_str().to_string());
        remainder.push_str(&tweet[last_end..m.start()]);
        last_end = m.end();
    }
    remainder.push_str(&tweet[last_end..]);

    let text = whitespace_regex()
        .replace_all(&remainder, " ")
        .trim()
        .to_string();
    let count = matches.len();

    Stripped {
        matches,
        count,
        text,
    }
}

/// Finds the URLs in an individual tweet.
pub fn strip_urls(tweet: &str) -> Stripped {
    strip_regex(tweet, url_regex())
}

/// Finds the Twitter accounts mentioned in an individual tweet.
///
/// E-mail addresses are not mistaken for mentions.
///
/// # Example
///
/// ```rust
/// use tweezers::twitter::strip_ats;
///
/// let stripped = strip_ats("@rustlang ships 2024 edition, mail me@example.com");
/// assert_eq!(stripped.matches, vec!["@rustlang"]);
/// ```
pub fn strip_ats(tweet: &str) -> Stripped {
    strip_regex(tweet, mention_regex())
}

/// Finds hashtags in an individual tweet. Tags are reported without the `#`.
pub fn strip_hashtags(tweet: &str) -> Stripped {
    let re = hashtag_regex();
    let mut stripped = strip_regex(tweet, re);
    // Group 1 excludes the '#', so drop the whole tag from the text.
    stripped.text = whitespace_regex()
        .replace_all(&re.replace_all(tweet, ""), " ")
        .trim()
        .to_string();
    stripped
}

/// Strips a tweet's text of `#` and `@` symbols and any URLs.
///
/// The words after the symbols are kept, so the result reads as plain prose
/// for sentiment scoring.
pub fn strip_tweet(tweet: &str) -> String {
    let without_symbols: String = tweet.chars().filter(|c| *c != '#' && *c != '@').collect();
    strip_urls(&without_symbols).text
}
