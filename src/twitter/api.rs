//! Core Twitter API utilities.
//!
//! This module contains low-level API utilities for making OAuth 1.0a signed
//! requests to the Twitter API.

use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::TwitterConfig;
use crate::error::Result;
use crate::oauth::build_oauth1_header;

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum number of characters before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

/// Status and body of a Twitter API response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends an OAuth 1.0a signed GET request to the Twitter API.
///
/// Unlike a plain `send`, a non-success status is not turned into an error here:
/// the response is handed back so callers can decide whether it is terminal.
///
/// # Parameters
///
/// - `client`: The HTTP client to send with
/// - `config`: Credentials used to sign the request
/// - `url`: Full request URL including query string
/// - `operation_name`: Human-readable name for the operation (for logging)
///
/// # Returns
///
/// - `Ok(ApiResponse)`: The status and body of whatever the API answered
/// - `Err(TweezersError)`: If signing fails or the request could not be sent
pub(crate) async fn send_signed_get(
    client: &Client,
    config: &TwitterConfig,
    url: &str,
    operation_name: &str,
) -> Result<ApiResponse> {
    info!("Making signed request for operation: {}", operation_name);
    debug!("Request URL: {}", url);

    let auth_header = build_oauth1_header(config, "GET", url, &[])?;
    debug!("Request headers: Authorization: OAuth [REDACTED]");

    let response = client
        .get(url)
        .header("Authorization", auth_header)
        .send()
        .await?;

    let status = response.status().as_u16();
    info!(
        "Received response with status: {} for operation: {}",
        status, operation_name
    );

    let body = response.text().await?;
    if status == 200 {
        debug!(
            "Response summary for '{}': {} bytes received",
            operation_name,
            body.len()
        );
    } else {
        warn!("Operation '{}' failed - Status: {}", operation_name, status);
        debug!(
            "Error response for '{}': {}",
            operation_name,
            sanitize_for_logging(&body, 200)
        );
    }

    Ok(ApiResponse { status, body })
}
