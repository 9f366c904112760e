//! Credential holder for the Twitter API.
//!
//! `TweezerAuth` owns the credentials and the HTTP client every search goes
//! through, and probes the credentials once when it is created.

use std::fmt;

use log::{info, warn};
use reqwest::Client;

use crate::config::TwitterConfig;
use crate::error::Result;

use super::api::{send_signed_get, ApiResponse};

/// Authenticated access to the Twitter API.
#[derive(Debug)]
pub struct TweezerAuth {
    config: TwitterConfig,
    client: Client,
    status_code: u16,
}

impl TweezerAuth {
    /// Creates the credential holder and verifies the credentials.
    ///
    /// The status of the `account/verify_credentials.json` probe is recorded
    /// rather than treated as fatal; check [`TweezerAuth::is_verified`].
    ///
    /// # Errors
    ///
    /// Fails only if the probe request could not be signed or sent.
    pub async fn new(config: TwitterConfig) -> Result<Self> {
        let client = Client::new();
        let mut auth = TweezerAuth {
            config,
            client,
            status_code: 0,
        };
        auth.status_code = auth.get_status().await?;

        if auth.is_verified() {
            info!("Twitter credentials verified");
        } else {
            warn!(
                "Twitter credential verification returned status code {}",
                auth.status_code
            );
        }

        Ok(auth)
    }

    async fn get_status(&self) -> Result<u16> {
        let url = format!("{}account/verify_credentials.json", self.config.base_url);
        let response = self.get(&url, "verify_credentials").await?;
        Ok(response.status)
    }

    /// Status code returned by the credential probe.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// `true` when the credential probe returned 200.
    pub fn is_verified(&self) -> bool {
        self.status_code == 200
    }

    /// Human-readable outcome of the credential probe.
    pub fn verify_message(&self) -> String {
        if self.is_verified() {
            "Congratulations! Your credentials are valid.".to_string()
        } else {
            format!(
                "Oops, something wrong with your credentials - HTTP response error code {}.",
                self.status_code
            )
        }
    }

    /// API root all request URLs are built against.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Sends a signed GET request.
    pub async fn get(&self, url: &str, operation_name: &str) -> Result<ApiResponse> {
        send_signed_get(&self.client, &self.config, url, operation_name).await
    }
}

impl fmt::Display for TweezerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Twitter Auth with status code {}", self.status_code)
    }
}
