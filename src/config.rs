//! Configuration module for the tweezers library.
//!
//! This module contains the credential structure and environment variable handling
//! for the Twitter API v1.1 integration.

use log::{debug, error, info, warn};
use std::env;

use crate::error::{Result, TweezersError};

/// Root of the Twitter REST API v1.1, used unless `xapi_base_url` overrides it.
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1/";

/// Configuration struct for Twitter API credentials.
///
/// This struct holds the four OAuth 1.0a secrets issued for a Twitter app
/// (consumer key/secret plus the user's access token/secret) and the API root
/// every request is built against.
#[derive(Clone)]
pub struct TwitterConfig {
    /// The consumer (API) key of the Twitter app
    pub consumer_key: String,
    /// The consumer (API) secret key of the Twitter app
    pub consumer_secret: String,
    /// The user access token
    pub access_token: String,
    /// The user access token secret
    pub access_token_secret: String,
    /// API root, always ending with `/`
    pub base_url: String,
}

impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("consumer_key", &mask_secret(&self.consumer_key))
            .field("consumer_secret", &"[REDACTED]")
            .field("access_token", &mask_secret(&self.access_token))
            .field("access_token_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Masks a secret for logging, keeping at most an 8-character prefix and suffix.
pub(crate) fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();
    let prefix: String = chars.iter().take(8).collect();

    if len > 16 {
        let suffix: String = chars[len - 8..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        format!("{}...", prefix)
    }
}

fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    }
}

impl TwitterConfig {
    /// Creates a configuration from explicit credentials, pointed at the public API.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        TwitterConfig {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the configuration at a different API root.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Creates a new `TwitterConfig` instance by loading credentials from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `xapi_consumer_key`: Consumer (API) key of the Twitter app
    /// - `xapi_consumer_secret`: Consumer (API) secret key of the Twitter app
    /// - `xapi_access_token`: User access token
    /// - `xapi_access_token_secret`: User access token secret
    ///
    /// # Optional Environment Variables
    ///
    /// - `xapi_base_url`: API root (defaults to `https://api.twitter.com/1.1/`)
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If all required environment variables are present and non-empty
    /// - `Err(TweezersError::Config)`: If any of them is missing or empty
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use tweezers::TwitterConfig;
    ///
    /// let config = TwitterConfig::from_env().unwrap();
    /// println!("{:?}", config);
    /// ```
    pub fn from_env() -> Result<Self> {
        info!("Loading Twitter configuration from environment variables");
        Self::from_source(|key| env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// Behaves exactly like [`TwitterConfig::from_env`], with `lookup` standing in for
    /// the process environment.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let consumer_key = required_credential(&lookup, "xapi_consumer_key")?;
        let consumer_secret = required_credential(&lookup, "xapi_consumer_secret")?;
        let access_token = required_credential(&lookup, "xapi_access_token")?;
        let access_token_secret = required_credential(&lookup, "xapi_access_token_secret")?;

        let base_url = match lookup("xapi_base_url") {
            Some(url) if !url.trim().is_empty() => {
                info!("Using Twitter API base URL override: {}", url);
                normalize_base_url(url.trim())
            }
            _ => {
                debug!("No xapi_base_url set, using {}", DEFAULT_BASE_URL);
                DEFAULT_BASE_URL.to_string()
            }
        };

        info!("Twitter configuration loaded successfully");

        Ok(TwitterConfig {
            consumer_key,
            consumer_secret,
            access_token,
            access_token_secret,
            base_url,
        })
    }
}

fn required_credential<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => {
            let value = value.trim().to_string();
            if value.is_empty() {
                error!("{} is empty", name);
                return Err(TweezersError::Config(format!("{} cannot be empty", name)));
            }

            info!("Found {} with length: {}", name, value.len());
            debug!("{} (masked): {}", name, mask_secret(&value));

            if value.len() < 10 {
                warn!(
                    "{} seems unusually short ({} characters)",
                    name,
                    value.len()
                );
            }

            Ok(value)
        }
        None => {
            error!("Failed to load {} from environment", name);
            Err(TweezersError::Config(format!(
                "Missing {} environment variable",
                name
            )))
        }
    }
}

/// Gets the server port from environment variables or returns the default.
///
/// This function reads the `PORT` environment variable and parses it as a u16.
/// If the environment variable is not set or cannot be parsed, it defaults to 3000.
///
/// # Example
///
/// ```rust
/// use tweezers::get_server_port;
///
/// std::env::remove_var("PORT");
/// assert_eq!(get_server_port(), 3000);
/// ```
pub fn get_server_port() -> u16 {
    match env::var("PORT") {
        Ok(port) => port.parse().unwrap_or_else(|_| {
            warn!("PORT '{}' is not a valid port number, using 3000", port);
            3000
        }),
        Err(_) => 3000,
    }
}
