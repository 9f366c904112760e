//! # Tests Module
//!
//! This module contains the tests for the tweezers library and service.
//!
//! ## Test Categories
//!
//! ### Unit Tests
//! - Configuration loading (`TwitterConfig::from_source`, `get_server_port`)
//! - OAuth 1.0a signing against Twitter's published example
//! - Query construction, text stripping, sentiment and table aggregation
//!
//! ### Integration Tests
//! - Paginated search against a mocked Twitter API (`wiremock`)
//! - HTTP endpoint testing for all routes
//!
//! ## Test Environment
//!
//! The `/search` endpoint test expects no `xapi_*` credentials in the
//! environment and verifies the resulting error response.

use crate::{
    client::Tweezers,
    config::{get_server_port, TwitterConfig},
    error::TweezersError,
    handlers::{handle_health, handle_root, handle_search, search_error_status},
    oauth::{build_oauth1_header_with, percent_encode, sign, signature_base_string},
    sentiment::{LexiconAnalyzer, Sentiment, SentimentAnalyzer},
    table::{ListColumn, TweetTable},
    twitter::{
        make_search_string, make_url, sanitize_for_logging, strip_ats, strip_hashtags,
        strip_regex, strip_tweet, strip_urls, url_encode, ResultType, SearchParams, SearchType, Tweet,
        TweezerAuth, TweezerSearch,
    },
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceExt;
use wiremock::matchers::{header_exists, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test application instance with all routes configured.
fn create_test_app() -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/search", get(handle_search))
}

fn test_config(base_url: &str) -> TwitterConfig {
    TwitterConfig::new(
        "consumer-key-0123456789",
        "consumer-secret-0123456789",
        "access-token-0123456789",
        "access-token-secret-0123456789",
    )
    .with_base_url(base_url)
}

/// A v1.1 status object posted on Monday 2022-10-10 at 20:MM:00 UTC, MM = id % 60.
fn status_json(id: u64, text: &str) -> Value {
    json!({
        "id": id,
        "id_str": id.to_string(),
        "text": text,
        "created_at": format!("Mon Oct 10 20:{:02}:00 +0000 2022", id % 60),
        "user": {"screen_name": format!("user{}", id), "followers_count": 10},
        "favorite_count": 1,
        "retweet_count": 2,
        "geo": null,
        "entities": {"hashtags": [], "user_mentions": [], "urls": [], "symbols": []}
    })
}

fn page_json(ids: &[u64], completed_in: f64) -> Value {
    let statuses: Vec<Value> = ids
        .iter()
        .map(|id| status_json(*id, &format!("tweet number {} is good", id)))
        .collect();
    json!({
        "statuses": statuses,
        "search_metadata": {"completed_in": completed_in, "count": 100}
    })
}

fn tweet_from(value: Value) -> Tweet {
    serde_json::from_value(value).unwrap()
}

/// Starts a mock API whose credential probe answers with `verify_status`.
async fn mock_api(verify_status: u16) -> (MockServer, TwitterConfig) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/account/verify_credentials.json"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(verify_status).set_body_json(json!({})))
        .mount(&server)
        .await;
    let config = test_config(&format!("{}/1.1", server.uri()));
    (server, config)
}

async fn mount_page(server: &MockServer, max_id: Option<&str>, response: ResponseTemplate) {
    let mock = Mock::given(method("GET")).and(path("/1.1/search/tweets.json"));
    let mock = match max_id {
        Some(id) => mock.and(query_param("max_id", id)),
        None => mock.and(query_param_is_missing("max_id")),
    };
    mock.respond_with(response).mount(server).await;
}

fn ok_page(ids: &[u64], completed_in: f64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(page_json(ids, completed_in))
}

// ---------------------------------------------------------------------------
// HTTP endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_handle_root() {
    let response = handle_root().await;
    assert!(response.starts_with("Tweezers"));
}

#[tokio::test]
async fn test_handle_health() {
    let Json(json_response): Json<Value> = handle_health().await;

    assert_eq!(json_response["status"], "healthy");
    assert_eq!(json_response["service"], "tweezers");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/health")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json_response: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json_response["status"], "healthy");
}

/// A search without `q` is rejected before any credentials are touched.
#[tokio::test]
async fn test_search_endpoint_requires_term() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/search?total=10")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json_response: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json_response["status"], "error");
    assert!(json_response["error"].as_str().unwrap().contains("'q'"));
}

#[tokio::test]
async fn test_search_endpoint_rejects_unknown_result_type() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/search?q=rust&result_type=newest")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Without `xapi_*` variables the service cannot sign requests.
#[tokio::test]
async fn test_search_endpoint_without_credentials() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/search?q=rustlang")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json_response: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json_response["status"], "error");
    assert!(json_response["message"]
        .as_str()
        .unwrap()
        .contains("Failed to load Twitter credentials"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_get_server_port() {
    std::env::remove_var("PORT");
    assert_eq!(get_server_port(), 3000);

    std::env::set_var("PORT", "8080");
    assert_eq!(get_server_port(), 8080);

    std::env::remove_var("PORT");
}

fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_config_from_source() {
    let vars = env_map(&[
        ("xapi_consumer_key", "consumer-key-0123456789"),
        ("xapi_consumer_secret", "consumer-secret-0123456789"),
        ("xapi_access_token", " access-token-0123456789 "),
        ("xapi_access_token_secret", "access-token-secret-0123456789"),
    ]);
    let config = TwitterConfig::from_source(|k| vars.get(k).cloned()).unwrap();

    assert_eq!(config.consumer_key, "consumer-key-0123456789");
    assert_eq!(config.access_token, "access-token-0123456789");
    assert_eq!(config.base_url, "https://api.twitter.com/1.1/");
}

#[test]
fn test_config_base_url_override_gets_trailing_slash() {
    let vars = env_map(&[
        ("xapi_consumer_key", "consumer-key-0123456789"),
        ("xapi_consumer_secret", "consumer-secret-0123456789"),
        ("xapi_access_token", "access-token-0123456789"),
        ("xapi_access_token_secret", "access-token-secret-0123456789"),
        ("xapi_base_url", "http://localhost:9999/1.1"),
    ]);
    let config = TwitterConfig::from_source(|k| vars.get(k).cloned()).unwrap();

    assert_eq!(config.base_url, "http://localhost:9999/1.1/");
}

#[test]
fn test_config_missing_or_empty_credentials() {
    let missing = env_map(&[("xapi_consumer_key", "consumer-key-0123456789")]);
    let err = TwitterConfig::from_source(|k| missing.get(k).cloned()).unwrap_err();
    assert!(err.to_string().contains("xapi_consumer_secret"));

    let empty = env_map(&[
        ("xapi_consumer_key", "consumer-key-0123456789"),
        ("xapi_consumer_secret", "   "),
    ]);
    let err = TwitterConfig::from_source(|k| empty.get(k).cloned()).unwrap_err();
    assert!(matches!(err, TweezersError::Config(_)));
    assert!(err.to_string().contains("cannot be empty"));
}

#[test]
fn test_config_debug_redacts_secrets() {
    let config = test_config("https://api.twitter.com/1.1/");
    let debug = format!("{:?}", config);

    assert!(!debug.contains("consumer-secret-0123456789"));
    assert!(!debug.contains("access-token-secret-0123456789"));
    assert!(debug.contains("[REDACTED]"));
}

// ---------------------------------------------------------------------------
// OAuth 1.0a
// ---------------------------------------------------------------------------

/// Credentials and request from Twitter's "Creating a signature" guide.
fn documented_config() -> TwitterConfig {
    TwitterConfig::new(
        "xvz1evFS4wEEPTGEFPHBog",
        "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
        "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
    )
}

const DOCUMENTED_URL: &str = "https://api.twitter.com/1.1/statuses/update.json?include_entities=true";
const DOCUMENTED_STATUS: &str = "Hello Ladies + Gentlemen, a signed OAuth request!";
const DOCUMENTED_NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
const DOCUMENTED_TIMESTAMP: i64 = 1318622958;

#[test]
fn test_percent_encode() {
    assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
    assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
    assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
    assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
}

#[test]
fn test_signature_base_string_matches_documented_example() {
    let url = url::Url::parse(DOCUMENTED_URL).unwrap();
    let base = signature_base_string(
        "post",
        &url,
        &[("status", DOCUMENTED_STATUS)],
        &[
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", DOCUMENTED_NONCE),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
            ("oauth_version", "1.0"),
        ],
    );

    assert_eq!(
        base,
        "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
         include_entities%3Dtrue%26\
         oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
         oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
         oauth_signature_method%3DHMAC-SHA1%26\
         oauth_timestamp%3D1318622958%26\
         oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
         oauth_version%3D1.0%26\
         status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
    );

    let config = documented_config();
    let signature = sign(&base, &config.consumer_secret, &config.access_token_secret).unwrap();
    assert_eq!(signature, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
}

#[test]
fn test_oauth1_header_contains_encoded_signature() {
    let header = build_oauth1_header_with(
        &documented_config(),
        "POST",
        DOCUMENTED_URL,
        &[("status", DOCUMENTED_STATUS)],
        DOCUMENTED_NONCE,
        DOCUMENTED_TIMESTAMP,
    )
    .unwrap();

    assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
    assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
    assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
    assert!(header.ends_with("oauth_version=\"1.0\""));
}

// ---------------------------------------------------------------------------
// Query construction
// ---------------------------------------------------------------------------

#[test]
fn test_url_encode() {
    assert_eq!(url_encode("rust lang"), "rust%20lang");
    assert_eq!(url_encode("100%"), "100%25");
    assert_eq!(url_encode("#rust @bob"), "%23rust%20%40bob");
    assert_eq!(url_encode("\"quoted\""), "%22quoted%22");
    assert_eq!(url_encode("a-b.c_d~e"), "a%2Db%2Ec%5Fd%7Ee");
    assert_eq!(url_encode("café"), "café");
}

#[test]
fn test_make_search_string() {
    assert_eq!(
        make_search_string("rust lang", SearchType::Words, true),
        "rust%20lang"
    );
    assert_eq!(
        make_search_string("rust lang", SearchType::Phrase, true),
        "%22rust%20lang%22"
    );
    // Already-quoted phrases are not quoted twice.
    assert_eq!(
        make_search_string("\"rust lang\"", SearchType::Phrase, true),
        "%22rust%20lang%22"
    );
    assert_eq!(
        make_search_string("rust lang", SearchType::Phrase, false),
        "%22rust%20lang%22%20-filter%3Aretweets"
    );
}

#[test]
fn test_make_url() {
    let base = "https://api.twitter.com/1.1/";
    assert_eq!(
        make_url(base, "rust", "en", ResultType::Recent, None),
        "https://api.twitter.com/1.1/search/tweets.json?q=rust&lang=en&count=100&result_type=recent"
    );
    assert_eq!(
        make_url(base, "rust", "de", ResultType::Popular, Some(1234)),
        "https://api.twitter.com/1.1/search/tweets.json?q=rust&lang=de&count=100&result_type=popular&max_id=1234"
    );
}

#[test]
fn test_enum_parsing() {
    assert_eq!("phrase".parse::<SearchType>().unwrap(), SearchType::Phrase);
    assert_eq!(" Words ".parse::<SearchType>().unwrap(), SearchType::Words);
    assert_eq!("MIXED".parse::<ResultType>().unwrap(), ResultType::Mixed);
    assert!("sentence".parse::<SearchType>().is_err());
    assert!("newest".parse::<ResultType>().is_err());
    assert_eq!(ResultType::default(), ResultType::Recent);
}

// ---------------------------------------------------------------------------
// Text parsing
// ---------------------------------------------------------------------------

#[test]
fn test_strip_urls() {
    let stripped = strip_urls("see https://t.co/abc and HTTP://example.com/x now");
    assert_eq!(stripped.matches, vec!["https://t.co/abc", "HTTP://example.com/x"]);
    assert_eq!(stripped.count, 2);
    assert_eq!(stripped.text, "see and now");
}

#[test]
fn test_strip_ats() {
    let stripped = strip_ats("@alice thanks, ping @bob2 or mail carol@example.com");
    assert_eq!(stripped.matches, vec!["@alice", "@bob2"]);
    assert_eq!(stripped.text, "thanks, ping or mail carol@example.com");

    // Handles need at least two characters.
    assert_eq!(strip_ats("@a hello").count, 0);
}

#[test]
fn test_strip_hashtags() {
    let stripped = strip_hashtags("I #love   #Rust2024 a lot");
    assert_eq!(stripped.matches, vec!["love", "Rust2024"]);
    assert_eq!(stripped.count, 2);
    assert_eq!(stripped.text, "I a lot");
}

#[test]
fn test_strip_regex_removes_only_matched_spans() {
    let re = regex::Regex::new(r"#(rust)\b").unwrap();
    let stripped = strip_regex("I trust #rust and rust", &re);
    assert_eq!(stripped.matches, vec!["rust"]);
    assert_eq!(stripped.text, "I trust # and rust");

    let stripped = strip_hashtags("trust the #rust process");
    assert_eq!(stripped.matches, vec!["rust"]);
    assert_eq!(stripped.text, "trust the process");
}

#[test]
fn test_strip_tweet() {
    assert_eq!(
        strip_tweet("Loving #rust with @bob https://t.co/abc !"),
        "Loving rust with bob !"
    );
    assert_eq!(strip_tweet("  \n "), "");
}

#[test]
fn test_sanitize_for_logging() {
    assert_eq!(sanitize_for_logging("a\nb\tc", 20), "a b c");
    assert_eq!(sanitize_for_logging("bell\u{7}", 20), "bell?");
    assert!(sanitize_for_logging(&"x".repeat(50), 10).starts_with("xxxxxxxxxx... [truncated"));
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_lexicon_analyzer() {
    let analyzer = LexiconAnalyzer::new();

    let s = analyzer.analyze("I love this");
    assert_close(s.polarity, 0.5);
    assert_close(s.subjectivity, 0.6);

    assert_close(analyzer.analyze("This is not good").polarity, -0.35);
    assert_close(analyzer.analyze("It isn't great").polarity, -0.4);
    assert_close(analyzer.analyze("VERY good").polarity, 0.91);
    assert_close(analyzer.analyze("good and bad").polarity, 0.0);

    assert_eq!(analyzer.analyze("the cat sat"), Sentiment::default());
    assert_eq!(analyzer.analyze(""), Sentiment::default());
}

#[test]
fn test_lexicon_analyzer_clamps_scores() {
    let s = LexiconAnalyzer::new().analyze("absolutely perfect");
    assert_close(s.polarity, 1.0);
    assert_close(s.subjectivity, 1.0);
}

#[test]
fn test_closure_analyzer() {
    let analyzer = |text: &str| Sentiment {
        polarity: if text.contains("yay") { 1.0 } else { 0.0 },
        subjectivity: 0.5,
    };
    assert_close(analyzer.analyze("yay").polarity, 1.0);
}

// ---------------------------------------------------------------------------
// Result table
// ---------------------------------------------------------------------------

#[test]
fn test_table_rows() {
    let mut value = status_json(61, "Loving #rust with @bob https://t.co/abc");
    value["geo"] = json!({"type": "Point", "coordinates": [51.5, -0.12]});
    let table = TweetTable::from_tweets(&[tweet_from(value)], &LexiconAnalyzer::new()).unwrap();

    assert_eq!(table.len(), 1);
    let row = &table.rows()[0];
    assert_eq!(row.user, "user61");
    assert_eq!(row.stripped_tweet, "Loving rust with bob");
    assert_eq!(row.urls, vec!["https://t.co/abc"]);
    assert_eq!(row.hashtags, vec!["rust"]);
    assert_eq!(row.ats, vec!["@bob"]);
    assert_eq!(row.created_at.to_rfc3339(), "2022-10-10T20:01:00+00:00");
    assert_eq!(row.favorite_count, 1);
    assert_eq!(row.retweet_count, 2);
    assert_eq!(row.coordinates, Some((51.5, -0.12)));
    assert_close(row.polarity, 0.0);
}

#[test]
fn test_table_rejects_bad_timestamp() {
    let mut value = status_json(1, "hello");
    value["created_at"] = json!("2022-10-10T20:00:00Z");
    let err = TweetTable::from_tweets(&[tweet_from(value)], &LexiconAnalyzer::new()).unwrap_err();
    assert!(err.to_string().contains("created_at"));
    assert!(matches!(err, TweezersError::MalformedResponse(_)));
    assert_eq!(search_error_status(&err), StatusCode::BAD_GATEWAY);
}

#[test]
fn test_search_error_status() {
    assert_eq!(search_error_status(&TweezersError::NoResults), StatusCode::NOT_FOUND);
    assert_eq!(
        search_error_status(&TweezersError::InvalidArgument("total".to_string())),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        search_error_status(&TweezersError::Api {
            operation: "search_tweets".to_string(),
            status: 503,
        }),
        StatusCode::BAD_GATEWAY
    );
}

#[test]
fn test_tweet_null_counts_read_as_zero() {
    let mut value = status_json(3, "hello");
    value["favorite_count"] = Value::Null;
    value.as_object_mut().unwrap().remove("retweet_count");
    let tweet = tweet_from(value);
    assert_eq!(tweet.favorite_count, 0);
    assert_eq!(tweet.retweet_count, 0);
}

#[test]
fn test_tweets_per_week() {
    // 20:00, 20:01, 20:02 → 120s spread over 3 tweets → 40s per tweet
    let tweets: Vec<Tweet> = [0u64, 1, 2]
        .iter()
        .map(|id| tweet_from(status_json(*id, "hi")))
        .collect();
    let table = TweetTable::from_tweets(&tweets, &LexiconAnalyzer::new()).unwrap();

    assert_eq!(table.time_per_tweet().unwrap().num_seconds(), 40);
    assert_eq!(table.tweets_per_week(), Some(15_120));

    let same_time: Vec<Tweet> = [60u64, 120]
        .iter()
        .map(|id| tweet_from(status_json(*id, "hi")))
        .collect();
    let table = TweetTable::from_tweets(&same_time, &LexiconAnalyzer::new()).unwrap();
    assert_eq!(table.tweets_per_week(), None);

    assert_eq!(TweetTable::default().time_per_tweet(), None);
}

#[test]
fn test_value_counts() {
    let tweets: Vec<Tweet> = [
        (1u64, "#rust #async"),
        (2, "#rust hi @bob"),
        (3, "@bob @alice"),
    ]
    .iter()
    .map(|(id, text)| tweet_from(status_json(*id, text)))
    .collect();
    let table = TweetTable::from_tweets(&tweets, &LexiconAnalyzer::new()).unwrap();

    assert_eq!(
        table.value_counts(ListColumn::Hashtags),
        vec![("rust".to_string(), 2), ("async".to_string(), 1)]
    );
    assert_eq!(
        table.value_counts(ListColumn::Ats),
        vec![("@bob".to_string(), 2), ("@alice".to_string(), 1)]
    );
    assert!(table.value_counts(ListColumn::Urls).is_empty());
    assert!("tweets".parse::<ListColumn>().is_err());
}

// ---------------------------------------------------------------------------
// Credential holder and paginated search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_auth_records_probe_status() {
    let (_server, config) = mock_api(200).await;
    let auth = TweezerAuth::new(config).await.unwrap();
    assert!(auth.is_verified());
    assert_eq!(auth.verify_message(), "Congratulations! Your credentials are valid.");
    assert_eq!(auth.to_string(), "Twitter Auth with status code 200");

    let (_server, config) = mock_api(401).await;
    let auth = TweezerAuth::new(config).await.unwrap();
    assert!(!auth.is_verified());
    assert_eq!(auth.status_code(), 401);
    assert!(auth.verify_message().contains("error code 401"));
}

#[tokio::test]
async fn test_search_pages_with_decreasing_cursor_and_trims() {
    let (server, config) = mock_api(200).await;
    mount_page(&server, None, ok_page(&[105, 104, 103, 102, 101], 0.1)).await;
    mount_page(&server, Some("100"), ok_page(&[100, 99, 98, 97, 96], 0.2)).await;

    let auth = TweezerAuth::new(config).await.unwrap();
    let search = TweezerSearch::run(
        &auth,
        SearchParams::new("rust").total(8),
        &LexiconAnalyzer::new(),
    )
    .await
    .unwrap();

    assert_eq!(search.result_count(), 8);
    assert_eq!(search.ids(), &[105, 104, 103, 102, 101, 100, 99, 98]);
    assert_eq!(search.results_json().len(), 8);
    assert_eq!(search.table().len(), 8);
    assert_close(search.completed_in(), 0.1 + 0.2);

    // verify + two search pages
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_search_sends_expected_query() {
    let (server, config) = mock_api(200).await;
    Mock::given(method("GET"))
        .and(path("/1.1/search/tweets.json"))
        .and(query_param("q", "\"rust lang\" -filter:retweets"))
        .and(query_param("lang", "en"))
        .and(query_param("count", "100"))
        .and(query_param("result_type", "mixed"))
        .and(query_param_is_missing("max_id"))
        .and(header_exists("Authorization"))
        .respond_with(ok_page(&[10], 0.01))
        .mount(&server)
        .await;
    mount_page(&server, Some("9"), ok_page(&[], 0.01)).await;

    let auth = TweezerAuth::new(config).await.unwrap();
    let params = SearchParams::new("rust lang")
        .search_type(SearchType::Phrase)
        .result_type(ResultType::Mixed);
    let search = TweezerSearch::run(&auth, params, &LexiconAnalyzer::new())
        .await
        .unwrap();

    assert_eq!(search.result_count(), 1);
    assert_eq!(search.search_string(), "%22rust%20lang%22%20-filter%3Aretweets");
}

#[tokio::test]
async fn test_search_stops_when_api_runs_dry() {
    let (server, config) = mock_api(200).await;
    mount_page(&server, None, ok_page(&[20, 19, 18], 0.1)).await;
    mount_page(&server, Some("17"), ok_page(&[17, 16], 0.1)).await;
    mount_page(&server, Some("15"), ok_page(&[], 0.1)).await;

    let auth = TweezerAuth::new(config).await.unwrap();
    let search = TweezerSearch::run(
        &auth,
        SearchParams::new("rust").total(100),
        &LexiconAnalyzer::new(),
    )
    .await
    .unwrap();

    assert_eq!(search.result_count(), 5);
    assert_eq!(search.ids(), &[20, 19, 18, 17, 16]);
    assert!(search.tweet_features().contains(&"created_at".to_string()));
    assert!(search.entities().contains(&"hashtags".to_string()));
    assert!(search.user_features().contains(&"screen_name".to_string()));
    assert_eq!(search.list_feature("id_str")[0], json!("20"));
    assert_eq!(search.list_feature("missing")[0], Value::Null);
}

#[tokio::test]
async fn test_search_features_keep_payload_order() {
    let (server, config) = mock_api(200).await;
    mount_page(&server, None, ok_page(&[30], 0.1)).await;
    mount_page(&server, Some("29"), ok_page(&[], 0.1)).await;

    let auth = TweezerAuth::new(config).await.unwrap();
    let search = TweezerSearch::run(&auth, SearchParams::new("rust"), &LexiconAnalyzer::new())
        .await
        .unwrap();

    assert_eq!(
        search.tweet_features(),
        &[
            "id",
            "id_str",
            "text",
            "created_at",
            "user",
            "favorite_count",
            "retweet_count",
            "geo",
            "entities"
        ]
    );
    assert_eq!(search.entities(), &["hashtags", "user_mentions", "urls", "symbols"]);
    assert_eq!(search.user_features(), &["screen_name", "followers_count"]);
}

#[tokio::test]
async fn test_search_tolerates_null_favorite_count() {
    let (server, config) = mock_api(200).await;
    let mut second = status_json(40, "second tweet");
    second["favorite_count"] = Value::Null;
    let page = json!({
        "statuses": [status_json(41, "first tweet"), second],
        "search_metadata": {"completed_in": 0.1}
    });
    mount_page(&server, None, ResponseTemplate::new(200).set_body_json(page)).await;
    mount_page(&server, Some("39"), ok_page(&[], 0.1)).await;

    let auth = TweezerAuth::new(config).await.unwrap();
    let search = TweezerSearch::run(&auth, SearchParams::new("rust"), &LexiconAnalyzer::new())
        .await
        .unwrap();

    assert_eq!(search.result_count(), 2);
    assert_eq!(search.table().rows()[1].favorite_count, 0);
}

#[tokio::test]
async fn test_search_stops_at_lowest_tweet_id() {
    let (server, config) = mock_api(200).await;
    mount_page(&server, None, ok_page(&[1, 0], 0.1)).await;

    let auth = TweezerAuth::new(config).await.unwrap();
    let search = TweezerSearch::run(
        &auth,
        SearchParams::new("rust").total(10),
        &LexiconAnalyzer::new(),
    )
    .await
    .unwrap();

    assert_eq!(search.ids(), &[1, 0]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_keeps_results_when_a_later_page_fails() {
    let (server, config) = mock_api(200).await;
    mount_page(&server, None, ok_page(&[50, 49], 0.1)).await;
    mount_page(&server, Some("48"), ResponseTemplate::new(429)).await;

    let auth = TweezerAuth::new(config).await.unwrap();
    let search = TweezerSearch::run(&auth, SearchParams::new("rust"), &LexiconAnalyzer::new())
        .await
        .unwrap();

    assert_eq!(search.result_count(), 2);
}

#[tokio::test]
async fn test_search_without_any_results() {
    let (server, config) = mock_api(200).await;
    mount_page(&server, None, ok_page(&[], 0.1)).await;

    let auth = TweezerAuth::new(config).await.unwrap();
    let err = TweezerSearch::run(&auth, SearchParams::new("zzzz"), &LexiconAnalyzer::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TweezersError::NoResults));
}

#[tokio::test]
async fn test_search_first_request_rejected() {
    let (server, config) = mock_api(200).await;
    mount_page(&server, None, ResponseTemplate::new(401)).await;

    let auth = TweezerAuth::new(config).await.unwrap();
    let err = TweezerSearch::run(&auth, SearchParams::new("rust"), &LexiconAnalyzer::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TweezersError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_search_rejects_zero_total() {
    let (_server, config) = mock_api(200).await;
    let auth = TweezerAuth::new(config).await.unwrap();
    let err = TweezerSearch::run(
        &auth,
        SearchParams::new("rust").total(0),
        &LexiconAnalyzer::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, TweezersError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_client_keeps_search_history() {
    let (server, config) = mock_api(200).await;
    mount_page(&server, None, ok_page(&[7, 6], 0.1)).await;
    mount_page(&server, Some("5"), ok_page(&[], 0.1)).await;

    let mut tweezers = Tweezers::new(config).await.unwrap().with_analyzer(|_: &str| Sentiment {
        polarity: 0.25,
        subjectivity: 0.75,
    });

    let first = tweezers.search(SearchParams::new("rust")).await.unwrap();
    assert_close(first.table().rows()[0].polarity, 0.25);
    tweezers
        .search(SearchParams::new("rust").include_rts(true))
        .await
        .unwrap();

    assert_eq!(tweezers.search_history().len(), 2);
    assert!(tweezers.search_history()[1].params().include_rts);
    assert_eq!(
        tweezers.search_history()[0].to_string(),
        "TweezerSearch instance created with arguments:\n\tsearch_term = rust\n\ttotal = 100"
    );
}
