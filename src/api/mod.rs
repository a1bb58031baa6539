//! Framework-free discovery endpoint handlers.
//!
//! The surrounding system owns routing and transport; these handlers take
//! already-extracted query parameters and produce a status code plus JSON
//! body. Validation failures are detected before any upstream call; upstream
//! failures are converted into fixed 500 bodies here and never escape as raw
//! errors.

use http::StatusCode;
use serde_json::{Value, json};

use crate::facets::{FilterState, RawFacets};
use crate::query::SearchQuery;
use crate::search::{IssueSearchGateway, RepositorySearchGateway};

#[cfg(test)]
mod tests;

/// Fixed 500 body for the repository search endpoint.
const REPOSITORIES_FAILURE: &str = "Failed to fetch repositories";

/// Fixed 500 body for the issue search endpoint.
const ISSUES_FAILURE: &str = "Failed to fetch good first issues";

/// Status code and JSON body returned to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status to send.
    pub status: StatusCode,
    /// JSON body to send.
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }
}

/// Handles `GET /api/repositories?language=&popularity=&keyword=`.
///
/// Returns 400 with the fixed validation message when a facet is rejected
/// (the gateway is never invoked), 200 with a JSON array of normalized
/// repository records, or 500 with a fixed message when the upstream call
/// fails.
pub async fn repository_search(
    gateway: &dyn RepositorySearchGateway,
    raw: &RawFacets,
) -> ApiResponse {
    let filter = match FilterState::validate(raw) {
        Ok(filter) => filter,
        Err(error) => {
            return ApiResponse::error(StatusCode::BAD_REQUEST, &error.to_string());
        }
    };

    let query = SearchQuery::for_repositories(&filter);
    match gateway.search_repositories(&query).await {
        Ok(records) => match serde_json::to_value(&records) {
            Ok(body) => ApiResponse::ok(body),
            Err(error) => {
                tracing::warn!(%error, "failed to serialize repository records");
                ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, REPOSITORIES_FAILURE)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "repository search failed");
            ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, REPOSITORIES_FAILURE)
        }
    }
}

/// Handles `GET /api/fetch-good-first-issues?language=`.
///
/// The language parameter is optional and intentionally not validated
/// against the fixed facet set; an unrecognized value simply becomes part of
/// the upstream qualifier. Returns 200 with `{ total_count, items }` or 500
/// with a fixed message.
pub async fn good_first_issues(
    gateway: &dyn IssueSearchGateway,
    language: Option<&str>,
) -> ApiResponse {
    let query = SearchQuery::for_good_first_issues(language);
    match gateway.search_issues(&query).await {
        Ok(results) => match serde_json::to_value(&results) {
            Ok(body) => ApiResponse::ok(body),
            Err(error) => {
                tracing::warn!(%error, "failed to serialize issue results");
                ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, ISSUES_FAILURE)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "issue search failed");
            ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, ISSUES_FAILURE)
        }
    }
}
