//! Tests for the wire-contract handlers.

use http::StatusCode;
use serde_json::json;

use crate::facets::RawFacets;
use crate::search::models::test_support::popular_repository;
use crate::search::{
    IssueLabel, IssueRecord, IssueRepository, IssueSearchResults, MockIssueSearchGateway,
    MockRepositorySearchGateway, SearchError,
};

use super::{good_first_issues, repository_search};

fn raw(language: Option<&str>, popularity: Option<&str>, keyword: Option<&str>) -> RawFacets {
    RawFacets {
        language: language.map(ToOwned::to_owned),
        popularity: popularity.map(ToOwned::to_owned),
        keyword: keyword.map(ToOwned::to_owned),
        free_text: None,
    }
}

#[tokio::test]
async fn invalid_language_yields_400_without_upstream_call() {
    // No expectations set: an upstream call would panic the mock.
    let gateway = MockRepositorySearchGateway::new();

    let response = repository_search(&gateway, &raw(Some("haskell"), None, None)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST, "status mismatch");
    assert_eq!(
        response.body,
        json!({ "error": "Invalid or unsupported language" }),
        "body mismatch"
    );
}

#[tokio::test]
async fn invalid_popularity_yields_400() {
    let gateway = MockRepositorySearchGateway::new();

    let response = repository_search(&gateway, &raw(Some("rust"), Some("viral"), None)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST, "status mismatch");
    assert_eq!(
        response.body,
        json!({ "error": "Invalid popularity mode" }),
        "body mismatch"
    );
}

#[tokio::test]
async fn invalid_keyword_yields_400() {
    let gateway = MockRepositorySearchGateway::new();

    let response =
        repository_search(&gateway, &raw(Some("rust"), Some("high"), Some("nope"))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST, "status mismatch");
    assert_eq!(
        response.body,
        json!({ "error": "Invalid keyword" }),
        "body mismatch"
    );
}

#[tokio::test]
async fn valid_facets_yield_serialized_records() {
    let mut gateway = MockRepositorySearchGateway::new();
    gateway
        .expect_search_repositories()
        .withf(|query| query.qualifier_string() == "language:python stars:>10000")
        .times(1)
        .returning(|_| Ok(vec![popular_repository(1, "numpy", 25_000)]));

    let response = repository_search(&gateway, &raw(Some("python"), Some("high"), None)).await;

    assert_eq!(response.status, StatusCode::OK, "status mismatch");
    let items = response.body.as_array().expect("body should be an array");
    assert_eq!(items.len(), 1, "item count mismatch");
    let item = items.first().expect("item should exist");
    assert_eq!(item["name"], "numpy", "name mismatch");
    assert_eq!(
        item["stargazers_count"], 25_000,
        "serialization should use the upstream field name"
    );
}

#[tokio::test]
async fn upstream_failure_yields_fixed_500_body() {
    let mut gateway = MockRepositorySearchGateway::new();
    gateway.expect_search_repositories().returning(|_| {
        Err(SearchError::Upstream {
            message: "search repositories failed with status 502".to_owned(),
        })
    });

    let response = repository_search(&gateway, &raw(Some("rust"), None, None)).await;

    assert_eq!(
        response.status,
        StatusCode::INTERNAL_SERVER_ERROR,
        "status mismatch"
    );
    assert_eq!(
        response.body,
        json!({ "error": "Failed to fetch repositories" }),
        "body mismatch"
    );
}

fn sample_issue() -> IssueRecord {
    IssueRecord {
        id: 9,
        title: "Fix docs typo".to_owned(),
        number: 512,
        html_url: "https://github.com/facebook/react/issues/512".to_owned(),
        repository: IssueRepository {
            name: "react".to_owned(),
            full_name: "facebook/react".to_owned(),
            html_url: "https://github.com/facebook/react".to_owned(),
        },
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        updated_at: "2024-01-02T00:00:00Z".to_owned(),
        labels: vec![IssueLabel {
            id: 1,
            name: "good first issue".to_owned(),
            color: "7057ff".to_owned(),
        }],
        state: "open".to_owned(),
    }
}

#[tokio::test]
async fn issue_search_returns_envelope_with_total_count() {
    let mut gateway = MockIssueSearchGateway::new();
    gateway
        .expect_search_issues()
        .withf(|query| {
            query.qualifier_string() == "label:\"good first issue\" state:open language:rust"
        })
        .times(1)
        .returning(|_| {
            Ok(IssueSearchResults {
                total_count: 1_234,
                items: vec![sample_issue()],
            })
        });

    let response = good_first_issues(&gateway, Some("rust")).await;

    assert_eq!(response.status, StatusCode::OK, "status mismatch");
    assert_eq!(response.body["total_count"], 1_234, "total count mismatch");
    assert_eq!(
        response.body["items"][0]["repository"]["full_name"], "facebook/react",
        "nested repository identity mismatch"
    );
}

#[tokio::test]
async fn issue_search_failure_yields_fixed_500_body() {
    let mut gateway = MockIssueSearchGateway::new();
    gateway.expect_search_issues().returning(|_| {
        Err(SearchError::Network {
            message: "search issues failed: connection reset".to_owned(),
        })
    });

    let response = good_first_issues(&gateway, None).await;

    assert_eq!(
        response.status,
        StatusCode::INTERNAL_SERVER_ERROR,
        "status mismatch"
    );
    assert_eq!(
        response.body,
        json!({ "error": "Failed to fetch good first issues" }),
        "body mismatch"
    );
}
