//! HTTP route handlers for the tweezers service.
//!
//! This module contains all the HTTP route handler functions that process
//! incoming requests and return appropriate responses.

use axum::{extract::Query, http::StatusCode, response::Json};
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::Tweezers;
use crate::config::TwitterConfig;
use crate::error::TweezersError;
use crate::twitter::{ResultType, SearchParams, SearchType};

type HandlerError = (StatusCode, Json<Value>);

/// Query string of `GET /search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub total: Option<usize>,
    pub lang: Option<String>,
    pub result_type: Option<String>,
    pub search_type: Option<String>,
    pub include_rts: Option<bool>,
}

fn error_response(status: StatusCode, message: &str, detail: String) -> HandlerError {
    (
        status,
        Json(json!({"status": "error", "message": message, "error": detail})),
    )
}

/// Status code a failed search is reported with.
pub(crate) fn search_error_status(error: &TweezersError) -> StatusCode {
    match error {
        TweezersError::NoResults => StatusCode::NOT_FOUND,
        TweezersError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl SearchQuery {
    /// Validates the query string into search arguments.
    fn into_params(self) -> Result<SearchParams, TweezersError> {
        let term = self.q.unwrap_or_default();
        if term.trim().is_empty() {
            return Err(TweezersError::InvalidArgument(
                "Missing search term parameter 'q'".to_string(),
            ));
        }

        let mut params = SearchParams::new(term);
        if let Some(total) = self.total {
            params = params.total(total);
        }
        if let Some(lang) = self.lang {
            params = params.language(lang);
        }
        if let Some(result_type) = self.result_type {
            params = params.result_type(result_type.parse::<ResultType>()?);
        }
        if let Some(search_type) = self.search_type {
            params = params.search_type(search_type.parse::<SearchType>()?);
        }
        if let Some(include_rts) = self.include_rts {
            params = params.include_rts(include_rts);
        }
        Ok(params)
    }
}

/// Handles GET requests to the root `/` endpoint.
pub async fn handle_root() -> &'static str {
    "Tweezers: search Twitter at /search?q=your+terms"
}

/// Handles GET requests to the `/health` endpoint.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "tweezers"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "tweezers"}))
}

/// Handles GET requests to the `/search` endpoint.
///
/// Runs a paginated search with the credentials from the environment and
/// returns the result table as JSON.
///
/// # Query Parameters
///
/// - `q` (required): Search term(s)
/// - `total`: Number of tweets wanted (default 100)
/// - `lang`: Language code (default `en`)
/// - `result_type`: `mixed`, `recent` (default) or `popular`
/// - `search_type`: `words` (default) or `phrase`
/// - `include_rts`: Whether to include retweets (default `false`)
///
/// # Success Response
///
/// ```json
/// {
///   "status": "success",
///   "search_term": "rustlang",
///   "requested": 100,
///   "returned": 100,
///   "completed_in": 0.213,
///   "tweets_per_week": 5040,
///   "rows": [ ... ]
/// }
/// ```
///
/// # Error Statuses
///
/// - 400: Missing `q`, zero `total` or an unknown enum value
/// - 404: The search returned no tweets at all
/// - 500: Credentials could not be loaded
/// - 502: The Twitter API could not be reached or answered with an error
pub async fn handle_search(
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, HandlerError> {
    let params = query.into_params().map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, "Invalid search request", e.to_string())
    })?;
    let requested = params.total;

    let config = TwitterConfig::from_env().map_err(|e| {
        error!("Failed to load Twitter configuration: {}", e);
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to load Twitter credentials",
            e.to_string(),
        )
    })?;

    let mut tweezers = Tweezers::new(config).await.map_err(|e| {
        error!("Failed to reach Twitter API: {}", e);
        error_response(
            StatusCode::BAD_GATEWAY,
            "Failed to reach Twitter API",
            e.to_string(),
        )
    })?;

    match tweezers.search(params).await {
        Ok(search) => {
            info!(
                "Search for '{}' returned {} tweets",
                search.search_term(),
                search.result_count()
            );
            Ok(Json(json!({
                "status": "success",
                "search_term": search.search_term(),
                "requested": requested,
                "returned": search.result_count(),
                "completed_in": search.completed_in(),
                "tweets_per_week": search.tweets_per_week(),
                "rows": search.table().rows(),
            })))
        }
        Err(e) => {
            error!("Search failed: {}", e);
            Err(error_response(
                search_error_status(&e),
                "Search failed",
                e.to_string(),
            ))
        }
    }
}
