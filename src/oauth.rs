//! OAuth authentication module for Twitter API v1.1 integration.
//!
//! This module implements OAuth 1.0a request signing with HMAC-SHA1, which the
//! v1.1 REST endpoints (search, credential verification) require for user
//! context requests.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{distributions::Alphanumeric, Rng};
use sha1::Sha1;
use url::Url;

use crate::config::TwitterConfig;
use crate::error::{Result, TweezersError};

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LENGTH: usize = 32;

/// Percent-encodes a string per RFC 3986, as OAuth 1.0a requires.
///
/// Only the unreserved characters `A-Z a-z 0-9 - . _ ~` are left as-is.
///
/// # Example
///
/// ```rust
/// use tweezers::oauth::percent_encode;
///
/// assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
/// ```
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builds the OAuth 1.0a signature base string.
///
/// # Parameters
///
/// - `method`: HTTP method, upper-cased in the output
/// - `url`: The full request URL; its query pairs are decoded and signed
/// - `extra_params`: Form-encoded body parameters, if any
/// - `oauth_params`: The `oauth_*` parameters, excluding `oauth_signature`
///
/// # Returns
///
/// `METHOD&enc(base_url)&enc(sorted_params)`, where the base URL has no query
/// or fragment and drops default ports.
pub fn signature_base_string(
    method: &str,
    url: &Url,
    extra_params: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
) -> String {
    let base_url = format!("{}{}", url.origin().ascii_serialization(), url.path());

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
        .chain(
            extra_params
                .iter()
                .chain(oauth_params.iter())
                .map(|(k, v)| (percent_encode(k), percent_encode(v))),
        )
        .collect();
    params.sort();

    let parameter_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&base_url),
        percent_encode(&parameter_string)
    )
}

/// Signs a base string with HMAC-SHA1, returning the base64 signature.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| TweezersError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Builds the `Authorization` header for an OAuth 1.0a signed request.
///
/// A fresh nonce and the current Unix timestamp are generated for every call.
///
/// # Parameters
///
/// - `config`: The credentials to sign with
/// - `method`: HTTP method of the request
/// - `url`: The full request URL including query string
/// - `body_params`: Form-encoded body parameters (empty for GET)
///
/// # Format
///
/// ```text
/// OAuth oauth_consumer_key="...", oauth_nonce="...", oauth_signature="...", ...
/// ```
pub fn build_oauth1_header(
    config: &TwitterConfig,
    method: &str,
    url: &str,
    body_params: &[(&str, &str)],
) -> Result<String> {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect();
    let timestamp = chrono::Utc::now().timestamp();

    build_oauth1_header_with(config, method, url, body_params, &nonce, timestamp)
}

/// Deterministic core of [`build_oauth1_header`] with caller-supplied nonce and timestamp.
pub fn build_oauth1_header_with(
    config: &TwitterConfig,
    method: &str,
    url: &str,
    body_params: &[(&str, &str)],
    nonce: &str,
    timestamp: i64,
) -> Result<String> {
    let parsed = Url::parse(url)?;
    let timestamp = timestamp.to_string();

    let oauth_params = [
        ("oauth_consumer_key", config.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", config.access_token.as_str()),
        ("oauth_version", OAUTH_VERSION),
    ];

    let base_string = signature_base_string(method, &parsed, body_params, &oauth_params);
    let signature = sign(
        &base_string,
        &config.consumer_secret,
        &config.access_token_secret,
    )?;

    let mut header_params: Vec<(&str, &str)> = oauth_params.to_vec();
    header_params.push(("oauth_signature", signature.as_str()));
    header_params.sort();

    let header = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", header))
}
